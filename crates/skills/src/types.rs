use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canonical per-skill metadata (`skills/<name>/metadata.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub use_count: u64,
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub failure_count: u64,
    #[serde(default)]
    pub last_used: Option<NaiveDate>,
    #[serde(default = "d_version")]
    pub version: String,
}

impl SkillRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: String::new(),
            tags: Vec::new(),
            summary: String::new(),
            dependencies: Vec::new(),
            use_count: 0,
            success_count: 0,
            failure_count: 0,
            last_used: None,
            version: d_version(),
        }
    }

    /// Record one read of the skill document.
    pub fn record_use(&mut self, today: NaiveDate) {
        self.use_count += 1;
        self.last_used = Some(today);
    }
}

fn d_version() -> String {
    "1.0".into()
}

/// Central skill index (`skills/skill-index/index.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillIndex {
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl SkillIndex {
    pub fn find(&self, name: &str) -> Option<&SkillRecord> {
        self.skills.iter().find(|s| s.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SkillRecord> {
        self.skills.iter_mut().find(|s| s.name == name)
    }

    /// Insert or replace a record, keeping the list sorted by name.
    pub fn upsert(&mut self, record: SkillRecord) {
        match self.skills.iter_mut().find(|s| s.name == record.name) {
            Some(existing) => *existing = record,
            None => {
                self.skills.push(record);
                self.skills.sort_by(|a, b| a.name.cmp(&b.name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_use_bumps_counter_and_date() {
        let mut skill = SkillRecord::new("deploy-checklist");
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        skill.record_use(today);
        skill.record_use(today);
        assert_eq!(skill.use_count, 2);
        assert_eq!(skill.last_used, Some(today));
    }

    #[test]
    fn upsert_keeps_sorted_order() {
        let mut index = SkillIndex::default();
        index.upsert(SkillRecord::new("zeta"));
        index.upsert(SkillRecord::new("alpha"));
        let names: Vec<_> = index.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn upsert_replaces_existing() {
        let mut index = SkillIndex::default();
        index.upsert(SkillRecord::new("alpha"));
        let mut updated = SkillRecord::new("alpha");
        updated.use_count = 7;
        index.upsert(updated);
        assert_eq!(index.skills.len(), 1);
        assert_eq!(index.find("alpha").unwrap().use_count, 7);
    }

    #[test]
    fn minimal_metadata_deserializes() {
        let record: SkillRecord = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(record.version, "1.0");
        assert_eq!(record.use_count, 0);
    }
}
