use anyhow::Result;
use clap::Args;

use rep_coach::config::Config;

use crate::ui::Dashboard;

#[derive(Args)]
pub struct DashboardCommand {}

impl DashboardCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let storage = super::open_storage(config)?;
        let mut dashboard = Dashboard::new(storage)?;
        dashboard.run()
    }
}
