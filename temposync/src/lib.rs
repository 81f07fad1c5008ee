//! A streaming, pitch-preserving time-domain audio speed changer.
//!
//! Unlike resampling, [`Stream`] preserves pitch: it discards or duplicates
//! whole pitch periods (detected via AMDF, cross-faded at the seam) rather
//! than changing the playback rate. Feed it mono `f32` samples with
//! [`Stream::write`], pull produced samples with [`Stream::read`], and call
//! [`Stream::flush`] once there's no more input.
//!
//! ```
//! use temposync::Stream;
//!
//! let mut stream = Stream::new(1.25, 16000).unwrap();
//! stream.write(&[0.0; 2000]).unwrap();
//! stream.flush().unwrap();
//! let mut buf = [0.0f32; 4096];
//! let _produced = stream.read(&mut buf);
//! ```

mod diagnostics;
mod error;
mod mutate;
mod pitch;
mod posfloat;
mod queue;
mod stream;

#[doc(inline)]
pub use diagnostics::*;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use posfloat::*;
#[doc(inline)]
pub use queue::SampleQueue;
#[doc(inline)]
pub use stream::Stream;

/// Human-voice pitch floor, in Hz. Bounds the estimator's search range.
pub const MIN_PITCH_HZ: u32 = 65;
/// Human-voice pitch ceiling, in Hz. Bounds the estimator's search range.
pub const MAX_PITCH_HZ: u32 = 400;
/// Target sample rate, after decimation, for the coarse AMDF pass.
pub const AMDF_FREQ: u32 = 4000;
/// Fine-search half-width around the coarse period, as a fraction of it.
pub const AMDF_RANGE: f32 = 0.1;
