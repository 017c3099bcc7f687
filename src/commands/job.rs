use owo_colors::OwoColorize;
use serde_json::json;

use crate::config::Config;
use crate::error::Result;
use crate::remote::{HttpGateway, JobStatus};

/// Print the status of a background processing job
pub async fn cmd_job(config: &Config, job_id: &str, output_json: bool) -> Result<()> {
    let gateway = HttpGateway::from_config(config)?;
    let status = gateway.job_status(job_id).await?;

    if output_json {
        let output = json!({
            "job_id": job_id,
            "job_status": status,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let label = match status {
        JobStatus::Pending => status.to_string().yellow().to_string(),
        JobStatus::Executed => status.to_string().green().to_string(),
    };
    println!("{} {}", job_id.cyan(), label);

    Ok(())
}
