//! 求人データの型定義

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// フィールドが取得できなかった場合の代替値
pub const NOT_AVAILABLE: &str = "N/A";

/// 求人1件分のレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub posted_date: String,
    pub description: String,
}

impl Default for JobRecord {
    fn default() -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            company: NOT_AVAILABLE.to_string(),
            location: NOT_AVAILABLE.to_string(),
            job_type: NOT_AVAILABLE.to_string(),
            posted_date: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
        }
    }
}

impl JobRecord {
    /// Excel列順の値
    pub fn values(&self) -> [&str; 6] {
        [
            self.title.as_str(),
            self.company.as_str(),
            self.location.as_str(),
            self.job_type.as_str(),
            self.posted_date.as_str(),
            self.description.as_str(),
        ]
    }

    pub fn field_mut(&mut self, field: JobField) -> &mut String {
        match field {
            JobField::Title => &mut self.title,
            JobField::Company => &mut self.company,
            JobField::Location => &mut self.location,
            JobField::JobType => &mut self.job_type,
            JobField::PostedDate => &mut self.posted_date,
            JobField::Description => &mut self.description,
        }
    }
}

/// 抽出対象フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    Title,
    Company,
    Location,
    JobType,
    PostedDate,
    Description,
}

impl JobField {
    pub const ALL: [JobField; 6] = [
        JobField::Title,
        JobField::Company,
        JobField::Location,
        JobField::JobType,
        JobField::PostedDate,
        JobField::Description,
    ];

    /// 求人カード内でのCSSセレクタ
    pub fn selector(self) -> &'static str {
        match self {
            JobField::Title => "h2 a",
            JobField::Company => ".joblist-comp-name",
            JobField::Location => ".top-jd-dtl li:first-child",
            JobField::JobType => ".job-type",
            JobField::PostedDate => ".posted-date",
            JobField::Description => ".list-job-dtl li:first-child",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Company => "company",
            JobField::Location => "location",
            JobField::JobType => "jobType",
            JobField::PostedDate => "postedDate",
            JobField::Description => "description",
        }
    }
}

/// 集計値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub total_jobs: usize,
    /// 会社名のユニーク数
    pub companies: usize,
}

impl JobStats {
    pub fn from_jobs(jobs: &[JobRecord]) -> Self {
        let companies: HashSet<&str> = jobs.iter().map(|job| job.company.as_str()).collect();
        Self {
            total_jobs: jobs.len(),
            companies: companies.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            company: company.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_is_sentinel() {
        let record = JobRecord::default();
        assert!(record.values().iter().all(|v| *v == NOT_AVAILABLE));
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(JobRecord::default()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for field in JobField::ALL {
            assert!(keys.contains(&field.name()), "missing key {}", field.name());
        }
    }

    #[test]
    fn test_stats_counts_distinct_companies() {
        let jobs = vec![
            job("Rust Dev", "Acme"),
            job("Go Dev", "Globex"),
            job("QA", "Acme"),
            job("Ops", NOT_AVAILABLE),
        ];
        let stats = JobStats::from_jobs(&jobs);
        assert_eq!(stats.total_jobs, 4);
        assert_eq!(stats.companies, 3);
    }

    #[test]
    fn test_stats_empty() {
        let stats = JobStats::from_jobs(&[]);
        assert_eq!(stats, JobStats { total_jobs: 0, companies: 0 });
    }
}
