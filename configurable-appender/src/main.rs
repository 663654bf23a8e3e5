/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod input;

use clap::Parser;
use keyed_appender::{ndc, Config, LoggingSetup};
use std::error::Error;
use std::io::{self, BufRead};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command()]
struct AppenderArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Set directly: `try_init` would also claim the `log` facade we install below.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Started configurable-appender");

    let args = AppenderArgs::parse();
    let config = Config::from_file(&args.config)?;
    let setup = LoggingSetup::from_config(&config)?;
    setup.logger().install()?;

    info!(root = setup.root_name(), level = %setup.level(), "logging configured");

    let mut lines = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line?;
        let (context, message) = input::split_line(&line);
        let _frame = context.map(ndc::push);
        log::info!(target: "configurable_appender", "{message}");
        lines += 1;
    }

    setup.shutdown();
    info!(lines, "stdin closed, shut down");
    Ok(())
}
