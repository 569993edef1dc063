// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use pws_config::AppConfig;
use pws_server::ContributionServer;
use tracing::{info, instrument};

#[instrument(skip_all)]
pub async fn execute(config: AppConfig) -> Result<()> {
    let server = ContributionServer::from_config(&config);
    info!(
        bind = %server.bind_address(),
        parallel = config.engine().parallel,
        trace_log = config.trace().log,
        "starting contribution server"
    );
    server.run().await
}
