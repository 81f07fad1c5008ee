/// An object a [`Stream`](crate::Stream) can report non-fatal problems to.
///
/// The engine never needs to log anything to function correctly -- every
/// condition it reports here is also reflected in a `Result`/return value --
/// but an embedder that already owns a logger will usually want to see these
/// too. The default implementation is silent, so headless and test use don't
/// need to wire anything in.
pub trait Diagnostics {
    /// Present and/or log a warning in some application-specific way.
    #[allow(unused_variables)]
    fn warning(&self, message: &str) {}
}

/// A [`Diagnostics`] implementation that discards every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}

/// A [`Diagnostics`] implementation that prints warnings to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn warning(&self, message: &str) {
        eprintln!("temposync warning: {}", message);
    }
}
