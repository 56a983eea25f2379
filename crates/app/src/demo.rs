//! The demonstration flow.

use std::sync::Arc;

use common::EntityId;
use domain::{
    Address, Customer, CustomerAddressChangedEvent, CustomerCreatedEvent, CustomerRepository,
    DomainEvent, Event, EventDispatcher, LogAgainWhenCustomerIsCreatedHandler,
    LogWhenCustomerAddressIsChangedHandler, LogWhenCustomerIsCreatedHandler, Money, Order,
    OrderItem, OrderRepository, Product, ProductCreatedEvent, ProductRepository, Repository,
    SendEmailWhenProductIsCreatedHandler,
};
use storage::{Store, Transaction};

use crate::error::Result;

/// What the flow left behind in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub customer_id: EntityId,
    pub order_id: EntityId,
    pub order_total: Money,
    pub orders: usize,
    pub products: usize,
}

/// Creates a dispatcher with every stock handler registered.
pub fn default_dispatcher() -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(
        ProductCreatedEvent::NAME,
        Arc::new(SendEmailWhenProductIsCreatedHandler),
    );
    dispatcher.register(
        CustomerCreatedEvent::NAME,
        Arc::new(LogWhenCustomerIsCreatedHandler),
    );
    dispatcher.register(
        CustomerCreatedEvent::NAME,
        Arc::new(LogAgainWhenCustomerIsCreatedHandler),
    );
    dispatcher.register(
        CustomerAddressChangedEvent::NAME,
        Arc::new(LogWhenCustomerAddressIsChangedHandler),
    );
    dispatcher
}

/// Runs the flow: products, a customer, an order placed in the same
/// transaction as a second customer, then an order update.
#[tracing::instrument(skip_all)]
pub async fn run<S: Store + Clone>(store: S, dispatcher: &EventDispatcher) -> Result<Summary> {
    let products = ProductRepository::new(store.clone());
    let customers = CustomerRepository::new(store.clone());
    let orders = OrderRepository::new(store.clone());

    let keyboard = Product::new(EntityId::new(), "Keyboard", Money::from_cents(4_990))?;
    let mouse = Product::new(EntityId::new(), "Mouse", Money::from_cents(1_990))?;
    for (product, description) in [(&keyboard, "Mechanical keyboard"), (&mouse, "Wireless mouse")]
    {
        products.create(product).await?;
        dispatcher.notify(&Event::from_domain(&ProductCreatedEvent::new(
            product,
            description,
        ))?)?;
    }

    let mut customer = Customer::new(EntityId::new(), "Alex")?;
    customers.create(&customer).await?;
    dispatcher.notify(&Event::from_domain(&CustomerCreatedEvent::from(&customer))?)?;

    customer.change_address(Address::new("Main Street", 42, "90210", "Springfield")?);
    customer.activate()?;
    customers.update(&customer).await?;
    if let Some(changed) = CustomerAddressChangedEvent::from_customer(&customer) {
        dispatcher.notify(&Event::from_domain(&changed)?)?;
    }

    let buyer = Customer::new(EntityId::new(), "Sam")?;
    let mut order = Order::new(
        EntityId::new(),
        buyer.id().clone(),
        vec![line(&keyboard, 1)?, line(&mouse, 2)?],
    )?;
    let mut tx = store.begin().await?;
    customers.create_in(&mut tx, &buyer).await?;
    orders.create_in(&mut tx, &order).await?;
    tx.commit().await?;
    dispatcher.notify(&Event::from_domain(&CustomerCreatedEvent::from(&buyer))?)?;
    tracing::info!(order_id = %order.id(), total = %order.total(), "order placed");

    let mut buyer = customers.find(buyer.id()).await?;
    buyer.add_reward_points(order.total().cents() / 100)?;
    customers.update(&buyer).await?;

    order.change_items(vec![line(&keyboard, 2)?])?;
    orders.update(&order).await?;
    let stored = orders.find(order.id()).await?;
    tracing::info!(order_id = %stored.id(), total = %stored.total(), "order updated");

    Ok(Summary {
        customer_id: customer.id().clone(),
        order_id: stored.id().clone(),
        order_total: stored.total(),
        orders: orders.find_all().await?.len(),
        products: products.find_all().await?.len(),
    })
}

fn line(product: &Product, quantity: u32) -> Result<OrderItem> {
    Ok(OrderItem::new(
        EntityId::new(),
        product.name(),
        product.price(),
        product.id().clone(),
        quantity,
    )?)
}
