/// Errors from the stream scanner.
///
/// Protocol anomalies are not errors in this sense: they are logged and
/// tallied, and scanning continues. The one condition surfaced here is the
/// contract violation the scanner does not defend against, a data frame
/// referencing a provider never announced by a prior status frame. The
/// caller decides whether to treat it as fatal.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A data frame referenced a provider id absent from the provider table.
    #[error("data frame references unannounced provider id {0}")]
    UnknownProvider(u32),
}

pub type Result<T> = std::result::Result<T, ScanError>;
