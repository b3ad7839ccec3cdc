use std::{fs, io, path::Path};

use anyhow::Context;
use healthvitals_core::{
    application::create_service,
    domain::{
        analysis::{
            AnalysisRecord, AnalyzeSymptomsInput, FollowUpAnalysisInput, QuickAnalyzeInput,
            SymptomAnalysisService, parse_analysis_response,
        },
        common::HealthVitalsConfig,
    },
};
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::{
    args::{Args, Command},
    validators::{AnalyzeSymptomsRequest, FollowUpRequest, QuickAnalyzeRequest},
};

pub async fn run(args: Args) -> anyhow::Result<()> {
    let requester = args.requester.clone();

    match args.command.clone() {
        Command::Parse { file } => {
            let raw = match file {
                Some(path) => read_file(&path)?,
                None => io::read_to_string(io::stdin()).context("failed to read reply from stdin")?,
            };
            print_json(&parse_analysis_response(&raw))
        }
        Command::Analyze { request } => {
            let request: AnalyzeSymptomsRequest = read_json(&request)?;
            request.validate()?;

            let service = create_service(HealthVitalsConfig::from(args)).await?;
            let mut input = AnalyzeSymptomsInput::from(request);
            input.requester = requester;
            print_json(&service.analyze_symptoms(input).await?)
        }
        Command::Quick { symptoms, age } => {
            let request = QuickAnalyzeRequest {
                symptoms: symptoms.trim().to_string(),
                age,
            };
            request.validate()?;

            let service = create_service(HealthVitalsConfig::from(args)).await?;
            let mut input = QuickAnalyzeInput::from(request);
            input.requester = requester;
            print_json(&service.quick_analyze(input).await?)
        }
        Command::FollowUp {
            previous,
            request,
            document,
        } => {
            let previous: AnalysisRecord = read_json(&previous)?;
            let request: FollowUpRequest = match request {
                Some(path) => read_json(&path)?,
                None => FollowUpRequest::default(),
            };
            request.validate()?;
            let document_text = read_file(&document)?;

            let service = create_service(HealthVitalsConfig::from(args)).await?;
            let mut input: FollowUpAnalysisInput = request.into_input(previous, document_text);
            input.requester = requester;
            print_json(&service.analyze_follow_up(input).await?)
        }
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    info!(path = %path.display(), "reading input file");
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = read_file(path)?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
