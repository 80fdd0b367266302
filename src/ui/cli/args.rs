// Wed Jan 15 2026 - Alex

use crate::patch::Edit;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "firmware-patcher")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Speed-limit parameter finder and patcher for scooter controller firmware", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(long, global = true)]
    pub json: bool,

    /// JSON configuration file overriding the built-in defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Header digest, entropy and possible magic bytes
    Analyze(ImageArgs),
    /// Every encoding of every menu speed found in the image
    FindSpeeds(ImageArgs),
    /// Matches grouped into scored candidates
    SpeedCandidates(ImageArgs),
    /// Patch suggestions for a target speed
    SuggestPatch(SuggestArgs),
    /// Byte-level comparison of two images
    Compare(CompareArgs),
    /// Printable ASCII runs
    ExtractStrings(StringsArgs),
    /// Pick the best suggestion for OLD -> NEW and optionally write it
    PatchSpeed(PatchSpeedArgs),
    /// Apply raw OFFSET:HEX edits
    Apply(ApplyArgs),
}

#[derive(Parser, Debug)]
pub struct ImageArgs {
    pub firmware: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SuggestArgs {
    pub firmware: PathBuf,

    pub target: u64,
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    pub firmware: PathBuf,

    pub other: PathBuf,
}

#[derive(Parser, Debug)]
pub struct StringsArgs {
    pub firmware: PathBuf,

    #[arg(short, long)]
    pub min_length: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct PatchSpeedArgs {
    pub firmware: PathBuf,

    pub old: u64,

    pub new: u64,

    /// Destination for the patched image. Without it the selection is only reported.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ApplyArgs {
    pub firmware: PathBuf,

    #[arg(short, long = "edit", required = true)]
    pub edits: Vec<Edit>,

    #[arg(short, long)]
    pub output: PathBuf,
}

impl PatchSpeedArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.old == self.new {
            return Err("Old and new speed are identical".to_string());
        }
        Ok(())
    }
}

impl ApplyArgs {
    pub fn validate(&self) -> Result<(), String> {
        if resolve(&self.output) == resolve(&self.firmware) {
            return Err("Output must differ from the input firmware".to_string());
        }
        Ok(())
    }
}

/// Canonical form of a path that may not exist yet. Falls back to the parent
/// directory, then to the path as given.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_apply_edits() {
        let args = Args::try_parse_from([
            "firmware-patcher",
            "apply",
            "fw.bin",
            "-e",
            "0x40:2800",
            "--edit",
            "70:28",
            "-o",
            "out.bin",
        ])
        .unwrap();

        match args.command {
            Command::Apply(apply) => {
                assert_eq!(apply.edits.len(), 2);
                assert_eq!(apply.edits[0], Edit::new(0x40, vec![0x28, 0x00]));
                assert!(apply.validate().is_ok());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_patch_speed_without_output() {
        let args =
            Args::try_parse_from(["firmware-patcher", "--json", "patch-speed", "fw.bin", "32", "40"])
                .unwrap();
        assert!(args.json);
        match args.command {
            Command::PatchSpeed(p) => {
                assert_eq!((p.old, p.new), (32, 40));
                assert!(p.output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_apply_rejects_same_file_spelled_differently() {
        let dir = tempfile::tempdir().unwrap();
        let firmware = dir.path().join("fw.bin");
        std::fs::write(&firmware, [0u8; 8]).unwrap();

        let apply = ApplyArgs {
            firmware: firmware.clone(),
            edits: vec![Edit::new(0, vec![0x01])],
            output: dir.path().join(".").join("fw.bin"),
        };
        assert!(apply.validate().is_err());

        let apply = ApplyArgs {
            output: dir.path().join("out.bin"),
            ..apply
        };
        assert!(apply.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_edit() {
        let result = Args::try_parse_from(["firmware-patcher", "apply", "fw.bin", "-e", "zz", "-o", "o"]);
        assert!(result.is_err());
    }
}
