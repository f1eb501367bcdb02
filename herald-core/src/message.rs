//! Message trait for emitted values.

/// A marker trait for values that can be emitted through a signal.
///
/// Messages must be `Send + Sync + 'static`: in asynchronous mode the same
/// message is borrowed by several threads at once.
///
/// Every type that meets those bounds is a message; multiple emission
/// arguments are expressed as a tuple.
///
/// # Example
///
/// ```rust,ignore
/// let mut signal = Signal::<(u32, String)>::synchronous();
/// signal.connect(|(id, body): &(u32, String)| println!("{id}: {body}"));
/// signal.emit(&(7, "ready".to_string()))?;
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Values emitted through a Herald signal are shared across threads."
)]
pub trait Message: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Message for T {}
