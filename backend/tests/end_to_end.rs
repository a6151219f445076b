//! Drives the store the way a front end would, against a real JSON document.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use kidsbank_backend::domain::{
    AppAction, AppStore, ChildAction, ChildFormAction, Screen, StackElementId,
    TransactionFormAction,
};
use kidsbank_backend::storage::{JsonConnection, JsonRegistryRepository, RegistryStorage};
use kidsbank_backend::{initialize_backend, AppConfig};
use shared::{TransactionType, DEFAULT_CHILD_NAME};
use tempfile::TempDir;
use uuid::Uuid;

type Recorder = Rc<RefCell<Vec<Screen>>>;
type TestStore = AppStore<JsonRegistryRepository, Box<dyn Fn(Screen)>>;

fn store_in(dir: &TempDir) -> (TestStore, Recorder) {
    let dismissed: Recorder = Rc::new(RefCell::new(Vec::new()));
    let recorder = dismissed.clone();
    let navigator: Box<dyn Fn(Screen)> = Box::new(move |screen| recorder.borrow_mut().push(screen));
    let repository = JsonRegistryRepository::new(JsonConnection::in_directory(dir.path()));
    let mut store = AppStore::new(repository, navigator);
    store.send(AppAction::OnAppear).unwrap();
    (store, dismissed)
}

fn add_child(store: &mut TestStore, name: &str) -> Uuid {
    store.send(AppAction::AddChildTapped).unwrap();
    store
        .send(AppAction::AddChild(ChildFormAction::SetName(name.to_string())))
        .unwrap();
    store.send(AppAction::AddChild(ChildFormAction::SaveTapped)).unwrap();
    store.state().registry.children().last().unwrap().id
}

fn open_detail(store: &mut TestStore, child_id: Uuid) -> StackElementId {
    store.send(AppAction::ChildCardTapped(child_id)).unwrap();
    store.state().path.last().unwrap().0
}

fn record(
    store: &mut TestStore,
    element: StackElementId,
    amount: f64,
    kind: TransactionType,
    description: &str,
) {
    let send = |store: &mut TestStore, action: ChildAction| {
        store.send(AppAction::ChildDetail { element, action }).unwrap();
    };
    send(store, ChildAction::AddTransactionTapped);
    send(store, ChildAction::AddTransaction(TransactionFormAction::SetAmount(amount)));
    send(store, ChildAction::AddTransaction(TransactionFormAction::SetType(kind)));
    send(
        store,
        ChildAction::AddTransaction(TransactionFormAction::SetDescription(description.to_string())),
    );
    send(store, ChildAction::AddTransaction(TransactionFormAction::SaveTapped));
}

#[test]
fn test_allowance_lifecycle() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("children.json"), "[]").unwrap();
    let (mut store, dismissed) = store_in(&dir);
    assert!(store.state().registry.is_empty());

    let child_id = add_child(&mut store, "");
    assert_eq!(store.state().registry.get(child_id).unwrap().name, DEFAULT_CHILD_NAME);
    assert_eq!(store.state().balance_of(child_id), Some(0.0));

    let element = open_detail(&mut store, child_id);
    record(&mut store, element, 10.0, TransactionType::Income, "Weekly allowance");
    assert_eq!(store.state().balance_of(child_id), Some(10.0));

    record(&mut store, element, 4.0, TransactionType::Outcome, "Candy");
    assert_eq!(store.state().balance_of(child_id), Some(6.0));

    let candy = store.state().registry.get(child_id).unwrap().transactions[0].id;
    store
        .send(AppAction::ChildDetail {
            element,
            action: ChildAction::DeleteTransaction(candy),
        })
        .unwrap();
    assert_eq!(store.state().balance_of(child_id), Some(10.0));

    assert_eq!(
        *dismissed.borrow(),
        vec![
            Screen::AddChild,
            Screen::AddTransaction(child_id),
            Screen::AddTransaction(child_id),
        ]
    );

    let reloaded = store.storage().load().unwrap();
    assert_eq!(reloaded, store.state().registry);
}

#[test]
fn test_registry_survives_restart() {
    let dir = TempDir::new().unwrap();
    let (mut store, _) = store_in(&dir);
    let maya = add_child(&mut store, "Maya");
    let element = open_detail(&mut store, maya);
    record(&mut store, element, 2.5, TransactionType::Income, "Chores");
    drop(store);

    let (store, _) = store_in(&dir);
    let child = store.state().registry.get(maya).unwrap();
    assert_eq!(child.name, "Maya");
    assert_eq!(child.transactions.len(), 1);
    assert_eq!(child.transactions[0].description, "Chores");
    assert_eq!(store.state().balance_of(maya), Some(2.5));
}

#[test]
fn test_deleting_a_child_keeps_the_others() {
    let dir = TempDir::new().unwrap();
    let (mut store, _) = store_in(&dir);
    let ada = add_child(&mut store, "Ada");
    let ben = add_child(&mut store, "Ben");
    let cy = add_child(&mut store, "Cy");

    for (child_id, amount) in [(ada, 3.0), (ben, 8.0), (cy, 5.0)] {
        let element = open_detail(&mut store, child_id);
        record(&mut store, element, amount, TransactionType::Income, "Allowance");
        record(&mut store, element, 1.0, TransactionType::Outcome, "Sticker");
        store.send(AppAction::NavigateBack).unwrap();
    }
    let ada_before = store.state().registry.get(ada).unwrap().clone();
    let cy_before = store.state().registry.get(cy).unwrap().clone();
    let ben_transactions: Vec<Uuid> = store
        .state()
        .registry
        .get(ben)
        .unwrap()
        .transactions
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ben_transactions.len(), 2);

    store.send(AppAction::DeleteChildTapped(vec![1])).unwrap();
    store.send(AppAction::ConfirmDeletion).unwrap();

    let (reopened, _) = store_in(&dir);
    let registry = &reopened.state().registry;
    assert_eq!(registry, &store.state().registry);
    assert_eq!(registry.children(), &[ada_before, cy_before]);
    assert!(registry.get(ben).is_none());
    assert!(registry
        .iter()
        .flat_map(|c| &c.transactions)
        .all(|t| !ben_transactions.contains(&t.id)));
}

#[test]
fn test_initialize_backend_reports_unreadable_document() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("children.json"), "{ not json").unwrap();
    let config = AppConfig {
        data_directory: dir.path().to_path_buf(),
        ..AppConfig::default()
    };

    let store = initialize_backend(&config, |_: Screen| {}).unwrap();
    assert!(store.state().registry.is_empty());
    assert!(store.state().alert.is_some());
    assert!(dir.path().join("children.json.unreadable").exists());
}
