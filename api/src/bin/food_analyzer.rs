use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use wsie_api::{
    application::logger::init_logger,
    args::{LlmArgs, LogArgs},
};
use wsie_core::{
    application::create_service,
    domain::{
        common::{FirebaseConfig, ImageConfig, WsieConfig},
        food_analysis::FoodAnalysisService,
        image::UploadedImage,
    },
};

/// Runs the two-stage leftover analysis on a single photo.
#[derive(Debug, Parser)]
#[command(name = "food-analyzer", version)]
struct AnalyzerArgs {
    /// Path to the food photo
    #[arg(long)]
    image: PathBuf,
    #[command(flatten)]
    llm: LlmArgs,
    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = AnalyzerArgs::parse();
    init_logger(&args.log);

    let bytes = tokio::fs::read(&args.image).await?;
    info!(path = %args.image.display(), size = bytes.len(), "Image loaded");

    let service = create_service(WsieConfig {
        llm: args.llm.into(),
        image: ImageConfig::default(),
        firebase: FirebaseConfig::default(),
    })
    .await;

    let upload = UploadedImage::new(bytes).with_file_name(args.image.display().to_string());
    let analysis = service.analyze_image(upload).await?;
    let report = service.generate_report(analysis).await?;

    println!("{}", report.report);
    for improvement in &report.improvements {
        println!("- {}", improvement.suggestion);
    }

    Ok(())
}
