//! End-to-end lifecycle scenarios against the in-memory ledger.

use sc_02_product_lifecycle::prelude::*;
use shared_types::ClientIdentity;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sc_02_product_lifecycle=debug")
        .with_test_writer()
        .try_init();
}

fn manufacturer() -> ClientIdentity {
    ClientIdentity::new("Org1MSP")
}

fn consumer() -> ClientIdentity {
    ClientIdentity::new("Org2MSP")
}

fn new_product(id: &str, manufacturer: &str) -> NewProduct {
    NewProduct {
        id: id.to_string(),
        name: "Widget".to_string(),
        description: "desc".to_string(),
        price: "9.99".to_string(),
        manufacturer: manufacturer.to_string(),
        created_date: "2024-01-01".to_string(),
    }
}

#[test]
fn widget_moves_from_creation_to_delivery() {
    init_tracing();
    let mut contract = create_test_contract();

    contract
        .create_product(&manufacturer(), new_product("42", "ManuA"))
        .unwrap();
    let record = contract.read_product(&consumer(), "42").unwrap();
    assert_eq!(record.status, ProductStatus::Pending);
    assert_eq!(record.consumer, "null");
    assert_eq!(record.owner_type, "42");

    contract
        .product_order(&consumer(), "42", "ConsB", "2024-01-02")
        .unwrap();
    let record = contract.read_product(&consumer(), "42").unwrap();
    assert_eq!(record.status, ProductStatus::PendingOrderRequest);
    assert_eq!(record.consumer, "ConsB");
    assert_eq!(record.modified_date, "2024-01-02");

    contract
        .product_accept(&manufacturer(), "42", "ManuA", "2024-01-03")
        .unwrap();
    assert_eq!(
        contract.get_product_status(&consumer(), "42").unwrap(),
        "Accepted"
    );

    let before = contract.read_product(&consumer(), "42").unwrap();
    let err = contract
        .product_order(&consumer(), "42", "ConsB", "2024-01-04")
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::InvalidTransition {
            id: "42".to_string(),
            from: ProductStatus::Accepted,
            operation: ContractOperation::ProductOrder,
        }
    );
    assert_eq!(contract.read_product(&consumer(), "42").unwrap(), before);

    contract
        .product_deliver(&manufacturer(), "42", "ManuA", "2024-01-05")
        .unwrap();
    let record = contract.read_product(&consumer(), "42").unwrap();
    assert_eq!(record.status, ProductStatus::Delivered);
    assert_eq!(record.delivered_date, "2024-01-05");
    assert_eq!(record.modified_date, "2024-01-05");

    for result in [
        contract.product_accept(&manufacturer(), "42", "ManuA", "2024-01-06"),
        contract.product_ship(&manufacturer(), "42", "2024-01-06"),
    ] {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidTransition);
    }
    assert_eq!(
        contract.read_product(&consumer(), "42").unwrap().status,
        ProductStatus::Delivered
    );
}

#[test]
fn non_manufacturer_cannot_create() {
    init_tracing();
    let mut contract = create_test_contract();

    let err = contract
        .create_product(&consumer(), new_product("43", "ManuA"))
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::AuthorizationDenied {
            operation: ContractOperation::CreateProduct,
            caller_org: "Org2MSP".to_string(),
        }
    );
    assert!(!contract.product_exists(&manufacturer(), "43").unwrap());
    assert!(!contract.verify_product_authenticity(&consumer(), "43").unwrap());
}

#[test]
fn duplicate_create_is_rejected() {
    let mut contract = create_test_contract();
    contract
        .create_product(&manufacturer(), new_product("42", "ManuA"))
        .unwrap();

    let err = contract
        .create_product(&manufacturer(), new_product("42", "ManuZ"))
        .unwrap_err();
    assert_eq!(err, ContractError::AlreadyExists { id: "42".to_string() });
    assert_eq!(
        contract.read_product(&consumer(), "42").unwrap().manufacturer,
        "ManuA"
    );
}

#[test]
fn update_requires_owning_manufacturer() {
    let mut contract = create_test_contract();
    contract
        .create_product(&manufacturer(), new_product("42", "ManuA"))
        .unwrap();

    let update = |owner: &str| ProductUpdate {
        id: "42".to_string(),
        name: "Gadget".to_string(),
        description: "better".to_string(),
        price: "19.99".to_string(),
        manufacturer: owner.to_string(),
        modified_date: "2024-02-01".to_string(),
    };

    let err = contract
        .update_product(&manufacturer(), update("ManuZ"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OwnershipMismatch);
    assert_eq!(contract.read_product(&consumer(), "42").unwrap().name, "Widget");

    contract
        .update_product(&manufacturer(), update("ManuA"))
        .unwrap();
    let record = contract.read_product(&consumer(), "42").unwrap();
    assert_eq!(record.name, "Gadget");
    assert_eq!(record.price, "19.99");
    assert_eq!(record.status, ProductStatus::Pending);
    assert_eq!(record.modified_date, "2024-02-01");
}

#[test]
fn deliver_requires_owning_manufacturer() {
    let mut contract = create_test_contract();
    contract
        .create_product(&manufacturer(), new_product("42", "ManuA"))
        .unwrap();

    let err = contract
        .product_deliver(&manufacturer(), "42", "ManuZ", "2024-01-05")
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::OwnershipMismatch {
            id: "42".to_string(),
            operation: ContractOperation::ProductDeliver,
        }
    );
    assert_eq!(
        contract.read_product(&consumer(), "42").unwrap().delivered_date,
        "null"
    );
}

#[test]
fn ship_twice_is_rejected() {
    let mut contract = create_test_contract();
    contract
        .create_product(&manufacturer(), new_product("42", "ManuA"))
        .unwrap();
    contract
        .product_ship(&manufacturer(), "42", "2024-01-04")
        .unwrap();

    let err = contract
        .product_ship(&manufacturer(), "42", "2024-01-05")
        .unwrap_err();
    assert!(matches!(
        err,
        ContractError::InvalidTransition {
            from: ProductStatus::Shipped,
            ..
        }
    ));
}

#[test]
fn mutations_on_missing_product_are_not_found() {
    let mut contract = create_test_contract();

    let results = [
        contract.product_order(&consumer(), "99", "ConsB", "d"),
        contract.product_accept(&manufacturer(), "99", "ManuA", "d"),
        contract.product_ship(&manufacturer(), "99", "d"),
        contract.product_deliver(&manufacturer(), "99", "ManuA", "d"),
    ];
    for result in results {
        assert_eq!(result, Err(ContractError::NotFound { id: "99".to_string() }));
    }
    assert!(matches!(
        contract.get_product_status(&consumer(), "99"),
        Err(ContractError::NotFound { .. })
    ));
    assert!(contract.store().is_empty());
}

#[test]
fn order_views_follow_the_lifecycle() {
    let mut contract = create_test_contract();
    contract
        .create_product(&manufacturer(), new_product("1", "ManuA"))
        .unwrap();
    contract
        .create_product(&manufacturer(), new_product("2", "ManuA"))
        .unwrap();
    contract
        .create_product(&manufacturer(), new_product("3", "ManuZ"))
        .unwrap();

    contract.product_order(&consumer(), "2", "ConsB", "d").unwrap();
    contract.product_order(&consumer(), "3", "ConsB", "d").unwrap();

    let ids = |records: Vec<ProductRecord>| -> Vec<String> {
        records.into_iter().map(|r| r.id).collect()
    };

    assert_eq!(
        ids(contract.get_order_requested_product_list(&consumer(), "ManuA").unwrap()),
        ["2"]
    );
    assert_eq!(
        ids(contract.get_consumer_ordered_product_list(&consumer(), "ConsB").unwrap()),
        ["2", "3"]
    );
    assert_eq!(
        ids(contract.get_products_by_manufacturer(&consumer(), "ManuA").unwrap()),
        ["1", "2"]
    );

    contract
        .product_accept(&manufacturer(), "2", "ManuA", "d")
        .unwrap();
    assert!(contract
        .get_order_requested_product_list(&consumer(), "ManuA")
        .unwrap()
        .is_empty());
    assert_eq!(
        ids(contract.get_consumer_ordered_product_list(&consumer(), "ConsB").unwrap()),
        ["2", "3"]
    );
}

#[test]
fn reorder_replaces_consumer_even_with_null() {
    let mut contract = create_test_contract();
    contract
        .create_product(&manufacturer(), new_product("42", "ManuA"))
        .unwrap();
    contract
        .product_order(&consumer(), "42", "ConsB", "2024-01-02")
        .unwrap();

    contract
        .product_order(&consumer(), "42", "null", "2024-01-03")
        .unwrap();
    let record = contract.read_product(&consumer(), "42").unwrap();
    assert_eq!(record.status, ProductStatus::PendingOrderRequest);
    assert_eq!(record.consumer, "null");
    assert_eq!(record.modified_date, "2024-01-03");

    contract
        .product_order(&consumer(), "42", "ConsC", "2024-01-04")
        .unwrap();
    contract
        .product_ship(&manufacturer(), "42", "2024-01-05")
        .unwrap();
    contract
        .product_order(&consumer(), "42", "null", "2024-01-06")
        .unwrap();
    let record = contract.read_product(&consumer(), "42").unwrap();
    assert_eq!(record.status, ProductStatus::PendingOrderRequest);
    assert_eq!(record.consumer, "null");
    assert_eq!(
        contract.track_product_history(&consumer(), "42").unwrap().len(),
        6
    );
}
