/*!
 * Frame overlay rendering.
 *
 * - `probe`: video stream metadata via ffprobe
 * - `overlay`: caption layout and pixel compositing onto a frame buffer
 * - `pipeline`: the sequential frame loop between an ffmpeg decode pipe and
 *   an ffmpeg encode pipe, producing a silent captioned stream
 */

pub mod probe;
pub mod overlay;
pub mod pipeline;

pub use probe::{probe_video, VideoMeta};
pub use overlay::{draw_caption, wrap_text, CaptionStyle, LoadedFont};
pub use pipeline::{render_silent, CaptionCursor};
