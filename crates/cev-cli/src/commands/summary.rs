//! Summary command implementation

use crate::api::client::ApiClient;
use crate::commands::summary_table;
use crate::error::Result;
use uuid::Uuid;

/// Run the summary command
pub async fn run(server_url: String, id: Uuid) -> Result<()> {
    let client = ApiClient::new(server_url, None)?;

    let summary = client.get_summary(id).await?;

    println!("{}", summary_table(std::slice::from_ref(&summary)));

    if !summary.type_distribution.is_empty() {
        println!("Type distribution:");
        let mut types: Vec<_> = summary.type_distribution.iter().collect();
        types.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (equipment_type, count) in types {
            println!("  {:<20} {}", equipment_type, count);
        }
    }

    Ok(())
}
