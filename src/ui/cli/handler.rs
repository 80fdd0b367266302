// Wed Jan 15 2026 - Alex

use super::args::{ApplyArgs, Args, Command, CompareArgs, ImageArgs, PatchSpeedArgs, StringsArgs, SuggestArgs};
use crate::analysis::{extract_strings, ExtractedString, HeaderAnalyzer};
use crate::config::Config;
use crate::diff::BinaryDiff;
use crate::image::FirmwareImage;
use crate::output::JsonSerializer;
use crate::patch::PatchApplier;
use crate::pattern::PatternScanner;
use crate::speed::{speed_candidates, SuggestionBuilder};
use crate::ui::display::DisplayRenderer;
use crate::utils::LoggingUtils;
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

pub struct CommandHandler {
    config: Config,
    renderer: DisplayRenderer,
    json: bool,
}

impl CommandHandler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            renderer: DisplayRenderer::new(),
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.renderer = self.renderer.with_color(use_color);
        self
    }

    pub fn execute(args: Args) -> anyhow::Result<()> {
        Self::setup_logging(&args);

        let config = match &args.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => Config::default(),
        };

        let handler = Self::new(config)
            .with_json(args.json)
            .with_color(!args.no_color);

        handler.dispatch(args.command)
    }

    fn setup_logging(args: &Args) {
        let level = LoggingUtils::level_from_str(&args.log_level);
        LoggingUtils::init_logger(level, !args.no_color);
    }

    pub fn dispatch(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Analyze(args) => self.handle_analyze(args),
            Command::FindSpeeds(args) => self.handle_find_speeds(args),
            Command::SpeedCandidates(args) => self.handle_candidates(args),
            Command::SuggestPatch(args) => self.handle_suggest(args),
            Command::Compare(args) => self.handle_compare(args),
            Command::ExtractStrings(args) => self.handle_strings(args),
            Command::PatchSpeed(args) => self.handle_patch_speed(args),
            Command::Apply(args) => self.handle_apply(args),
        }
    }

    fn load(&self, path: &Path) -> anyhow::Result<FirmwareImage> {
        FirmwareImage::load(path).with_context(|| format!("Firmware file not usable: {}", path.display()))
    }

    fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", JsonSerializer::new().serialize(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }

    fn handle_analyze(&self, args: ImageArgs) -> anyhow::Result<()> {
        let image = self.load(&args.firmware)?;
        let info = HeaderAnalyzer::from_config(&self.config).analyze(&image);
        self.emit(&info, || self.renderer.render_header(info.as_ref()))
    }

    fn handle_find_speeds(&self, args: ImageArgs) -> anyhow::Result<()> {
        let image = self.load(&args.firmware)?;
        let matches = PatternScanner::from_config(&self.config).scan(image.as_bytes(), &self.config.speed_menu);
        self.emit(&matches, || self.renderer.render_matches(&matches))
    }

    fn handle_candidates(&self, args: ImageArgs) -> anyhow::Result<()> {
        let image = self.load(&args.firmware)?;
        let candidates = speed_candidates(image.as_bytes(), &self.config);
        self.emit(&candidates, || self.renderer.render_candidates(&candidates))
    }

    fn handle_suggest(&self, args: SuggestArgs) -> anyhow::Result<()> {
        let image = self.load(&args.firmware)?;
        let candidates = speed_candidates(image.as_bytes(), &self.config);
        let suggestions = SuggestionBuilder::from_config(&self.config).build(&candidates, args.target);
        self.emit(&suggestions, || self.renderer.render_suggestions(args.target, &suggestions))
    }

    fn handle_compare(&self, args: CompareArgs) -> anyhow::Result<()> {
        let old = self.load(&args.firmware)?;
        let new = self.load(&args.other)?;
        let result = BinaryDiff::from_config(&self.config).compare(old.as_bytes(), new.as_bytes());
        self.emit(&result, || self.renderer.render_diff(&result))
    }

    fn handle_strings(&self, args: StringsArgs) -> anyhow::Result<()> {
        let image = self.load(&args.firmware)?;
        let min_length = args.min_length.unwrap_or(self.config.min_string_length);
        let strings: Vec<ExtractedString> = extract_strings(image.as_bytes(), min_length).collect();
        self.emit(&strings, || self.renderer.render_strings(&strings))
    }

    fn handle_patch_speed(&self, args: PatchSpeedArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let image = self.load(&args.firmware)?;
        let candidates = speed_candidates(image.as_bytes(), &self.config);
        let builder = SuggestionBuilder::from_config(&self.config);

        let Some(selected) = builder.select(&candidates, args.old, args.new) else {
            let alternatives = builder.build(&candidates, args.new);
            if !self.json {
                println!(
                    "{} No suitable patterns found for changing {} KPH to {} KPH",
                    "[!]".red(),
                    args.old,
                    args.new
                );
            }
            self.emit(&alternatives, || self.renderer.render_suggestions(args.new, &alternatives))?;
            anyhow::bail!("No patch candidate for {} -> {} KPH", args.old, args.new);
        };

        self.emit(&selected, || {
            format!(
                "{} Selected patch with confidence {:.1}\n{}",
                "[+]".green(),
                selected.confidence,
                self.renderer.render_suggestion(1, &selected)
            )
        })?;

        match &args.output {
            Some(output) => {
                PatchApplier::apply_and_write(&image, &selected.edits(), output)
                    .with_context(|| format!("Failed to create patched firmware {}", output.display()))?;
                if !self.json {
                    println!("{} Patched firmware saved to: {}", "[+]".green(), output.display());
                }
            }
            None => log::info!("No --output given, patch not written"),
        }
        Ok(())
    }

    fn handle_apply(&self, args: ApplyArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let image = self.load(&args.firmware)?;
        PatchApplier::apply_and_write(&image, &args.edits, &args.output)
            .with_context(|| format!("Failed to create patched firmware {}", args.output.display()))?;

        if !self.json {
            println!(
                "{} Applied {} edits, patched firmware saved to: {}",
                "[+]".green(),
                args.edits.len(),
                args.output.display()
            );
        }
        Ok(())
    }
}
