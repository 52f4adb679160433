use crate::error::Result;
use crate::model::{DayBucket, ReportOutput};

pub fn to_json(output: &ReportOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// One bucket per line.
pub fn to_ndjson(days: &[DayBucket]) -> Result<String> {
    let mut out = String::new();
    for bucket in days {
        out.push_str(&serde_json::to_string(bucket)?);
        out.push('\n');
    }
    Ok(out)
}
