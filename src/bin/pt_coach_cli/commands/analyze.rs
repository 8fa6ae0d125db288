// ABOUTME: One-shot movement analysis of a single video file
// ABOUTME: Prints the parsed result as JSON without running the full wizard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::path::Path;

use anyhow::{bail, Result};
use pt_coach::config::CoachConfig;
use pt_coach::models::MovementKind;
use pt_coach::services::VideoClip;
use tokio::time::timeout;
use tracing::info;

use super::build_service;

/// Analyze `video` as `kind` and print the result
pub async fn analyze(path: &Path, kind: MovementKind, seated: bool, offline: bool) -> Result<()> {
    let config = CoachConfig::from_env()?;
    let clip = VideoClip::from_path(path, config.wizard.max_video_bytes).await?;
    let service = build_service(offline, config.llm_provider, config.wizard.service_timeout()).await;
    let variant = seated.then(|| kind.seated_variant());

    info!(
        movement = %kind,
        bytes = clip.len(),
        service = service.name(),
        "Analyzing single clip"
    );

    let analysis = timeout(
        config.wizard.service_timeout(),
        service.analyze_movement(&clip, kind, variant),
    )
    .await;
    match analysis {
        Ok(Ok(result)) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Ok(Err(error)) => bail!("{}: {error}", error.retry_message()),
        Err(_) => bail!(
            "analysis did not finish within {}s",
            config.wizard.service_timeout_secs
        ),
    }
}
