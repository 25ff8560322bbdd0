//! Default filling and integer coercion.

use crate::types::{MISSING_TEXT, NO_ACCOUNT, ReportRow, ReportTable, UserRecord};
use grpusage_slurm::{Partition, PartitionUsage};

/// Turn every record into a complete row, ordered by username.
pub fn normalize(table: &ReportTable) -> Vec<ReportRow> {
    table
        .iter()
        .map(|(username, record)| normalize_record(username, record))
        .collect()
}

/// Fill defaults for one record.
///
/// Missing text becomes `NA`, missing or empty tiers become `-`, missing
/// counts become 0, and storage is truncated to whole GB.
pub fn normalize_record(username: &str, record: &UserRecord) -> ReportRow {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING_TEXT.to_string());
    let usage = |partition: Partition| {
        record
            .usage
            .get(&partition)
            .copied()
            .unwrap_or_default()
    };

    let account = match &record.account_tiers {
        Some(tiers) if !tiers.is_empty() => tiers.join(", "),
        _ => NO_ACCOUNT.to_string(),
    };

    let PartitionUsage {
        jobs: batch_jobs,
        cpu_seconds: batch_usage,
    } = usage(Partition::Batch);
    let PartitionUsage {
        jobs: bigmem_jobs,
        cpu_seconds: bigmem_usage,
    } = usage(Partition::Bigmem);
    let PartitionUsage {
        jobs: gpu_jobs,
        cpu_seconds: gpu_usage,
    } = usage(Partition::Gpu);

    ReportRow {
        username: username.to_string(),
        name: text(&record.name),
        email: text(&record.email),
        affiliation: record
            .affiliation
            .map(|a| a.to_string())
            .unwrap_or_else(|| MISSING_TEXT.to_string()),
        account,
        batch_jobs,
        batch_usage,
        bigmem_jobs,
        bigmem_usage,
        gpu_jobs,
        gpu_usage,
        gb_used: whole_gb(record.gb_used),
    }
}

/// Truncate reported GB to an integer; negative or NaN values become 0.
fn whole_gb(gb: Option<f64>) -> u64 {
    match gb {
        Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpusage_identity::Affiliation;
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_record_gets_defaults() {
        let row = normalize_record("ghost", &UserRecord::default());
        assert_eq!(row.username, "ghost");
        assert_eq!(row.name, "NA");
        assert_eq!(row.email, "NA");
        assert_eq!(row.affiliation, "NA");
        assert_eq!(row.account, "-");
        assert_eq!(row.batch_jobs, 0);
        assert_eq!(row.gpu_usage, 0);
        assert_eq!(row.gb_used, 0);
    }

    #[test]
    fn test_full_record() {
        let record = UserRecord {
            name: Some("Alice Smith".to_string()),
            email: Some("alice@example.edu".to_string()),
            affiliation: Some(Affiliation::Secondary),
            account_tiers: Some(vec!["priority".to_string(), "gpu-he".to_string()]),
            usage: BTreeMap::from([
                (Partition::Batch, PartitionUsage { jobs: 3, cpu_seconds: 350 }),
                (Partition::Bigmem, PartitionUsage { jobs: 1, cpu_seconds: 60 }),
            ]),
            gb_used: Some(42.9),
        };

        let row = normalize_record("alice", &record);
        assert_eq!(row.affiliation, "secondary");
        assert_eq!(row.account, "priority, gpu-he");
        assert_eq!((row.batch_jobs, row.batch_usage), (3, 350));
        assert_eq!((row.bigmem_jobs, row.bigmem_usage), (1, 60));
        assert_eq!((row.gpu_jobs, row.gpu_usage), (0, 0));
        assert_eq!(row.gb_used, 42);
    }

    #[test]
    fn test_empty_tier_list_renders_dash() {
        let record = UserRecord {
            account_tiers: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(normalize_record("bob", &record).account, "-");
    }

    #[test]
    fn test_rows_sorted_by_username() {
        let mut table = ReportTable::new();
        table.insert("zed".to_string(), UserRecord::default());
        table.insert("amy".to_string(), UserRecord::default());
        let rows = normalize(&table);
        let names: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["amy", "zed"]);
    }

    #[test]
    fn test_whole_gb() {
        assert_eq!(whole_gb(Some(7.99)), 7);
        assert_eq!(whole_gb(Some(-1.0)), 0);
        assert_eq!(whole_gb(Some(f64::NAN)), 0);
        assert_eq!(whole_gb(None), 0);
    }
}
