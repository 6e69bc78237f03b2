use crate::handlers::TagHandler;

/// Handler bound to tags with no registered handler, or whose handler could
/// not be constructed.
///
/// It never touches the document. Both splitting predicates keep their
/// default of `true`: an unknown tag has no effects that could leak across
/// a split, so there is nothing to suppress.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHandler;

impl TagHandler for DefaultHandler {}
