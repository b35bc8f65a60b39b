use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use brochure_core::app::{SiteBuilder, SweepLoop};
use brochure_core::config::SiteConfig;
use brochure_core::domain::{FileDescriptor, PreferencesPatch, Theme};
use brochure_core::impls::{DisplayList, FileStore};
use brochure_core::render::{Frame, Palette, Service, ServiceComparison};
use brochure_core::upload::DropZoneEvent;

/// Drive one scripted visit of the brochure site and write what it drew.
#[derive(Debug, Parser)]
#[command(name = "brochure", version, about)]
struct Args {
    /// JSON config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the durable store.
    #[arg(long, default_value = ".brochure")]
    data_dir: PathBuf,

    /// Where rendered charts and the export are written.
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Page path reported to the page-view counter.
    #[arg(long, default_value = "/index.html")]
    path: String,

    /// Seed for the simulated upload progress.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &args.config {
        Some(path) => SiteConfig::from_file(path)?,
        None => SiteConfig::default(),
    };
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("failed to create {}", args.data_dir.display()))?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;

    let store = FileStore::open(args.data_dir.join("storage.json")).context("failed to open durable store")?;
    let site = Arc::new(
        SiteBuilder::new(config)
            .durable_store(Arc::new(store))
            .with_builtin_charts()?
            .expect_visualizations(&["hero", "vision", "mission", "values", "service-comparison"])
            .build()?,
    );

    let report = site.boot(&args.path);
    tracing::info!(?report, "boot finished");
    let sweep = SweepLoop::spawn(Arc::clone(&site), site.config().storage.cleanup_interval());

    site.save_preferences(&PreferencesPatch::theme(Theme::Dark));
    site.save_search_query("thiết kế website");
    site.track_interaction("Liên hệ ngay");

    // uploads
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut zone = site.drop_zone("upload-area");
    site.handle_drop(&mut zone, DropZoneEvent::DragEnter, &mut rng);
    let ids = site.handle_drop(
        &mut zone,
        DropZoneEvent::Drop(vec![
            FileDescriptor::new("brief.pdf", 240 * 1024, "application/pdf"),
            FileDescriptor::new("logo.png", 80 * 1024, "image/png"),
            FileDescriptor::new("setup.exe", 1024, "application/octet-stream"),
        ]),
        &mut rng,
    );
    tracing::info!(started = ids.len(), "uploads started");
    let uploads = site.uploads();
    while uploads.lock().is_uploading() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    // charts
    let frame = Frame::default().with_services(vec![Service::Web, Service::Cloud]);
    for kind in site.renderer().registry().registered_kinds() {
        let svg = site.render_chart(kind, &frame)?.to_svg();
        let path = args.out.join(format!("{kind}.svg"));
        std::fs::write(&path, svg).with_context(|| format!("failed to write {}", path.display()))?;
    }

    let width = f64::from(site.config().render.width);
    let height = f64::from(site.config().render.height);
    let mut comparison = ServiceComparison::new(
        site.renderer().clone(),
        DisplayList::new(width, height),
        Palette::SITE,
    )?;
    comparison.toggle(Service::Mobile, true)?;
    std::fs::write(args.out.join("service-comparison-mobile.svg"), comparison.canvas().to_svg())?;

    let canvas = Arc::new(Mutex::new(DisplayList::new(width, height)));
    let (hero, _visible) = site.hero_animation(Arc::clone(&canvas));
    let (stop_tx, stop_rx) = watch::channel(false);
    let hero_task = tokio::spawn(hero.run(site.config().render.frame_interval(), stop_rx));
    tokio::time::sleep(Duration::from_millis(250)).await;
    let _ = stop_tx.send(true);
    let frames = hero_task.await?;
    std::fs::write(args.out.join("hero-last-frame.svg"), canvas.lock().to_svg())?;
    tracing::info!(frames, "hero animation stopped");

    let bundle = site.export_data()?;
    let export_path = args.out.join(&bundle.file_name);
    std::fs::write(&export_path, bundle.to_json_pretty()?)?;

    let removed = sweep.shutdown_and_join().await;
    if let Some(storage) = site.storage() {
        println!("{}", serde_json::to_string_pretty(&storage.stats())?);
    }
    println!("{}", serde_json::to_string_pretty(&site.analytics())?);
    println!("export: {} ({} entries)", export_path.display(), bundle.len());
    tracing::info!(removed, "done");
    Ok(())
}
