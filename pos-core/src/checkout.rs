//! Checkout orchestrator
//!
//! Two-step confirm: [`CheckoutService::prepare`] validates the cart and
//! freezes it into a [`Receipt`] for the confirmation prompt;
//! [`CheckoutService::commit`] runs the irreversible part.
//!
//! The commit is a saga over the remote store: claim an order number, write
//! the pending order, apply the stock decrements, then clear the cart. A
//! failure partway compensates every step already applied: the pending
//! order is removed, stock counters restored and the claimed number given
//! back, so one user-facing error never leaves half a checkout behind.

use crate::cart::Cart;
use crate::counter::OrderCounter;
use crate::session::Session;
use crate::stock::StockService;
use crate::store::{RemoteStore, Saga, paths};
use shared::{AppError, AppResult, Receipt, ReceiptLine, util};
use std::sync::Arc;

#[derive(Clone)]
pub struct CheckoutService {
    store: Arc<dyn RemoteStore>,
    counter: OrderCounter,
    stock: StockService,
}

impl CheckoutService {
    pub fn new(store: Arc<dyn RemoteStore>, counter: OrderCounter, stock: StockService) -> Self {
        Self {
            store,
            counter,
            stock,
        }
    }

    /// Validate the cart and freeze it into the receipt shown on the
    /// confirmation prompt
    ///
    /// Nothing is persisted and nothing mutates; dismissing the prompt
    /// simply drops the receipt.
    pub fn prepare(&self, cart: &Cart, session: &Session) -> AppResult<Receipt> {
        let customer_name = cart.customer_name().trim();
        if customer_name.is_empty() {
            return Err(AppError::validation("customer name is required"));
        }
        if cart.is_empty() {
            return Err(AppError::validation("cart is empty"));
        }

        let totals = cart.totals();
        let items = cart
            .lines()
            .iter()
            .map(|line| ReceiptLine {
                product_name: line.product_name.clone(),
                variation: line.variation,
                size: line.size.clone(),
                price: util::format_money(line.unit_price),
                quantity: line.quantity,
            })
            .collect();

        Ok(Receipt {
            customer_name: customer_name.to_string(),
            discount: util::format_money(totals.discount),
            order_date_time: util::now_order_datetime(),
            preference: cart.preference(),
            staff_name: session.staff_name().to_string(),
            subtotal: util::format_money(totals.subtotal),
            total: util::format_money(totals.total),
            items,
        })
    }

    /// The irreversible commit branch of the confirmation prompt
    ///
    /// Returns the assigned order number. On failure the cart and counter
    /// are left as they were and a single error surfaces.
    pub async fn commit(&self, cart: &mut Cart, receipt: Receipt) -> AppResult<u64> {
        let order_no = self.counter.claim().await?;

        let mut saga = Saga::new(self.store.clone());
        match self.run_steps(&mut saga, order_no, &receipt).await {
            Ok(()) => {
                saga.commit();
                cart.clear();
                tracing::info!(
                    order_no,
                    customer = %receipt.customer_name,
                    total = %receipt.total,
                    "checkout confirmed"
                );
                Ok(order_no)
            }
            Err(e) => {
                tracing::error!(order_no, error = %e, "checkout failed, compensating");
                saga.compensate().await;
                self.counter.release(order_no).await;
                Err(e)
            }
        }
    }

    async fn run_steps(
        &self,
        saga: &mut Saga,
        order_no: u64,
        receipt: &Receipt,
    ) -> AppResult<()> {
        saga.set(&paths::order(order_no), receipt.to_value()).await?;
        self.stock
            .apply_order(saga, &receipt.items, receipt.preference)
            .await?;
        Ok(())
    }
}
