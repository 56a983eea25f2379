use app::{default_dispatcher, run};
use domain::{
    CustomerAddressChangedEvent, CustomerCreatedEvent, CustomerRepository, DomainEvent, Money,
    ProductCreatedEvent, Repository,
};
use storage::InMemoryStore;

#[test]
fn default_dispatcher_registers_stock_handlers() {
    let dispatcher = default_dispatcher();

    let names = |event: &str| -> Vec<&'static str> {
        dispatcher
            .handlers(event)
            .unwrap()
            .iter()
            .map(|h| h.name())
            .collect()
    };

    assert_eq!(
        names(ProductCreatedEvent::NAME),
        vec!["SendEmailWhenProductIsCreatedHandler"]
    );
    assert_eq!(
        names(CustomerCreatedEvent::NAME),
        vec![
            "LogWhenCustomerIsCreatedHandler",
            "LogAgainWhenCustomerIsCreatedHandler"
        ]
    );
    assert_eq!(names(CustomerAddressChangedEvent::NAME).len(), 1);
}

#[tokio::test]
async fn demo_runs_against_in_memory_store() {
    let store = InMemoryStore::new();
    let summary = run(store.clone(), &default_dispatcher()).await.unwrap();

    assert_eq!(summary.orders, 1);
    assert_eq!(summary.products, 2);
    assert_eq!(summary.order_total, Money::from_cents(9_980));
    assert_eq!(store.customer_count().await, 2);
    assert_eq!(store.product_count().await, 2);
    assert_eq!(store.order_item_count().await, 1);

    let customer = CustomerRepository::new(store)
        .find(&summary.customer_id)
        .await
        .unwrap();
    assert!(customer.is_active());
    assert_eq!(customer.address().unwrap().city(), "Springfield");
}
