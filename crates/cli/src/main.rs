use std::path::PathBuf;
use std::process;

use clap::Parser;

use gesture_deck_core::identity::infrastructure::enrollment_directory::EnrollmentDirectory;
use gesture_deck_core::identity::infrastructure::sidecar_template_extractor::SidecarTemplateExtractor;
use gesture_deck_core::presentation::infrastructure::slide_directory::load_slide_deck;
use gesture_deck_core::session::authenticate_presenter_use_case::AuthenticatePresenterUseCase;
use gesture_deck_core::session::domain::narrator::Speaker;
use gesture_deck_core::session::infrastructure::command_speaker::{CommandSpeaker, LogSpeaker};
use gesture_deck_core::session::infrastructure::jsonl_frame_source::JsonlFrameSource;
use gesture_deck_core::session::infrastructure::log_overlay_sink::LogOverlaySink;
use gesture_deck_core::session::infrastructure::threaded_narrator::ThreadedNarrator;
use gesture_deck_core::session::run_presentation_use_case::RunPresentationUseCase;
use gesture_deck_core::session::session_logger::StdoutSessionLogger;
use gesture_deck_core::shared::config::SessionConfig;

/// Face-gated, gesture-controlled slide presentation.
#[derive(Parser)]
#[command(name = "gesture-deck")]
struct Cli {
    /// Recorded landmark stream, one JSON frame per line.
    #[arg(long)]
    frames: PathBuf,

    /// Directory of approved-user images (<name>.jpg).
    #[arg(long)]
    enroll_dir: Option<PathBuf>,

    /// Directory of pre-rendered slide images.
    #[arg(long)]
    slides_dir: Option<PathBuf>,

    /// Config file (defaults to the platform config location).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Face match threshold on cosine similarity (-1.0 to 1.0).
    #[arg(long)]
    threshold: Option<f64>,

    /// Frames a discrete gesture blocks the next one.
    #[arg(long)]
    debounce: Option<u32>,

    /// Text-to-speech command; narration is logged when omitted.
    #[arg(long)]
    speak_command: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli)?;

    let registry =
        EnrollmentDirectory::new(&config.enroll_dir).load(&mut SidecarTemplateExtractor::new())?;
    let deck = load_slide_deck(&config.slides_dir)?;
    let mut source = JsonlFrameSource::open(&cli.frames)?;

    let mut auth = AuthenticatePresenterUseCase::new(
        registry,
        config.clone(),
        Box::new(LogOverlaySink::new()),
        Box::new(StdoutSessionLogger::default()),
        None,
    );
    let outcome = auth.execute(&mut source)?;
    let Some(presenter) = outcome.identity.filter(|_| outcome.admitted) else {
        return Err("presenter was not admitted".into());
    };

    let narrator = ThreadedNarrator::new(build_speaker(cli.speak_command.as_deref())?);
    let mut presentation = RunPresentationUseCase::new(
        presenter,
        deck,
        &config,
        Box::new(narrator),
        Box::new(LogOverlaySink::new()),
        Box::new(StdoutSessionLogger::default()),
        None,
    );
    let summary = presentation.execute(&mut source);
    log::info!(
        "Session over after {} frames: {} action(s), final slide {}",
        summary.frames,
        summary.actions,
        summary.final_slide + 1
    );

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.frames.exists() {
        return Err(format!("Frame stream not found: {}", cli.frames.display()).into());
    }
    if let Some(t) = cli.threshold {
        if !(-1.0..=1.0).contains(&t) {
            return Err(format!("Threshold must be between -1.0 and 1.0, got {t}").into());
        }
    }
    if let Some(cmd) = &cli.speak_command {
        if cmd.trim().is_empty() {
            return Err("--speak-command must not be empty".into());
        }
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    let mut config = SessionConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.enroll_dir {
        config.enroll_dir = dir.clone();
    }
    if let Some(dir) = &cli.slides_dir {
        config.slides_dir = dir.clone();
    }
    if let Some(t) = cli.threshold {
        config.face_match_threshold = t;
    }
    if let Some(d) = cli.debounce {
        config.debounce_delay = d;
    }
    config.validate()?;
    Ok(config)
}

fn build_speaker(command: Option<&str>) -> Result<Box<dyn Speaker>, Box<dyn std::error::Error>> {
    match command {
        Some(cmd) => {
            let speaker = CommandSpeaker::from_command_line(cmd)
                .ok_or_else(|| format!("Invalid speak command: {cmd:?}"))?;
            log::info!("Narrating with '{}'", speaker.program());
            Ok(Box::new(speaker))
        }
        None => Ok(Box::new(LogSpeaker)),
    }
}
