//! User-facing failure notices. One notice per failure class, each with a
//! stable machine code and a fixed user-safe message; the cart never exposes
//! raw errors to consumers.

/// The fixed set of notices a cart operation can surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartNotice {
    AddFailed,
    RemoveFailed,
    UpdateFailed,
    OutOfStock,
}

impl CartNotice {
    pub fn code(&self) -> &'static str {
        match self {
            Self::AddFailed => "cart.add_failed",
            Self::RemoveFailed => "cart.remove_failed",
            Self::UpdateFailed => "cart.update_failed",
            Self::OutOfStock => "cart.out_of_stock",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::AddFailed => "Could not add the product to the cart.",
            Self::RemoveFailed => "Could not remove the product from the cart.",
            Self::UpdateFailed => "Could not update the product quantity.",
            Self::OutOfStock => "Requested quantity is out of stock.",
        }
    }
}

/// Fire-and-forget delivery of a notice to the user. No severity levels, no
/// acknowledgement; implementations must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: CartNotice);
}

impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    fn notify(&self, notice: CartNotice) {
        (**self).notify(notice);
    }
}

/// Default sink: emits the notice through the tracing pipeline. UIs supply
/// their own sink to render toasts instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: CartNotice) {
        tracing::error!(event_name = notice.code(), "{}", notice.message());
    }
}

#[cfg(test)]
mod tests {
    use super::CartNotice;

    #[test]
    fn every_notice_has_a_distinct_code_and_message() {
        let notices = [
            CartNotice::AddFailed,
            CartNotice::RemoveFailed,
            CartNotice::UpdateFailed,
            CartNotice::OutOfStock,
        ];

        for (i, a) in notices.iter().enumerate() {
            for b in notices.iter().skip(i + 1) {
                assert_ne!(a.code(), b.code());
                assert_ne!(a.message(), b.message());
            }
        }
    }

    #[test]
    fn out_of_stock_keeps_its_user_facing_literal() {
        assert_eq!(CartNotice::OutOfStock.message(), "Requested quantity is out of stock.");
    }
}
