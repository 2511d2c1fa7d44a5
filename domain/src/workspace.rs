//! Workspace path conventions
//!
//! All capability adapters share one filesystem workspace and own a distinct
//! subdirectory namespace, keyed by the source file's stem:
//!
//! ```text
//! <root>/inputs/                                    uploaded source audio
//! <root>/separated/htdemucs/<input_stem>/*.wav      separation stems
//! <root>/midi/<input_stem>_basic_pitch.mid          transcription output
//! <root>/outputs/generated_music.wav                generation output
//! ```
//!
//! Stem-keyed directories are reused across runs: two runs over different
//! files that share a file name will write to the same subdirectory. That
//! matches the external tools' own layout and is a deliberate, documented
//! decision rather than run-scoped namespacing, which would change every
//! user-visible path.

use std::path::{Path, PathBuf};

/// The fixed set of stems the separation model produces.
pub const STEM_NAMES: [&str; 4] = ["vocals", "drums", "bass", "other"];

/// Directory tag of the separation model (demucs writes under this name).
pub const SEPARATION_MODEL_TAG: &str = "htdemucs";

/// Fixed suffix the transcription tool appends to generated MIDI files.
pub const MIDI_SUFFIX: &str = "_basic_pitch.mid";

/// Fixed file name of the generation output.
pub const GENERATED_AUDIO_FILE: &str = "generated_music.wav";

/// Pure path arithmetic over the shared workspace. No I/O here; directory
/// creation happens in the infrastructure bootstrap.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where uploaded source audio lives.
    pub fn inputs_dir(&self) -> PathBuf {
        self.root.join("inputs")
    }

    /// Root the separation tool writes under (it adds its own model tag).
    pub fn separated_dir(&self) -> PathBuf {
        self.root.join("separated")
    }

    /// Where transcription MIDI files are written.
    pub fn midi_dir(&self) -> PathBuf {
        self.root.join("midi")
    }

    /// Where generated audio is written.
    pub fn outputs_dir(&self) -> PathBuf {
        self.root.join("outputs")
    }

    /// All four directories, for startup bootstrap.
    pub fn all_dirs(&self) -> [PathBuf; 4] {
        [
            self.inputs_dir(),
            self.separated_dir(),
            self.midi_dir(),
            self.outputs_dir(),
        ]
    }

    /// The directory the separation model writes one input's stems into:
    /// `separated/htdemucs/<input_stem>/`.
    pub fn stem_dir(&self, input: &Path) -> PathBuf {
        self.separated_dir()
            .join(SEPARATION_MODEL_TAG)
            .join(file_stem(input))
    }

    /// The four expected stem artifacts for one input, in canonical order.
    pub fn stem_paths(&self, input: &Path) -> [(&'static str, PathBuf); 4] {
        let dir = self.stem_dir(input);
        STEM_NAMES.map(|stem| (stem, dir.join(format!("{stem}.wav"))))
    }

    /// The single expected MIDI artifact for one input:
    /// `midi/<input_stem>_basic_pitch.mid`.
    pub fn midi_path(&self, input: &Path) -> PathBuf {
        self.midi_dir()
            .join(format!("{}{}", file_stem(input), MIDI_SUFFIX))
    }

    /// The fixed generation output path: `outputs/generated_music.wav`.
    pub fn generated_audio_path(&self) -> PathBuf {
        self.outputs_dir().join(GENERATED_AUDIO_FILE)
    }
}

/// File stem as a string, empty if the path has none.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_paths_follow_demucs_layout() {
        let layout = WorkspaceLayout::new("/w");
        let paths = layout.stem_paths(Path::new("/uploads/song.mp3"));

        assert_eq!(paths.len(), 4);
        assert_eq!(paths[0].0, "vocals");
        assert_eq!(
            paths[0].1,
            PathBuf::from("/w/separated/htdemucs/song/vocals.wav")
        );
        assert_eq!(
            paths[3].1,
            PathBuf::from("/w/separated/htdemucs/song/other.wav")
        );
    }

    #[test]
    fn test_midi_path_suffix_convention() {
        let layout = WorkspaceLayout::new("/w");
        assert_eq!(
            layout.midi_path(Path::new("take 1.wav")),
            PathBuf::from("/w/midi/take 1_basic_pitch.mid")
        );
    }

    #[test]
    fn test_generated_audio_is_fixed_path() {
        let layout = WorkspaceLayout::new("/w");
        assert_eq!(
            layout.generated_audio_path(),
            PathBuf::from("/w/outputs/generated_music.wav")
        );
    }

    #[test]
    fn test_same_stem_collides_across_directories() {
        // Documented behavior: same-named inputs share output namespaces.
        let layout = WorkspaceLayout::new("/w");
        let a = layout.stem_dir(Path::new("/a/song.mp3"));
        let b = layout.stem_dir(Path::new("/b/song.wav"));
        assert_eq!(a, b);
    }
}
