use pretty_assertions::assert_eq;
use ratatui_collections_core::compare::SortDirection;
use ratatui_collections_core::error::Error;
use ratatui_collections_core::events::CollectionAction;
use ratatui_collections_core::field::Record;
use ratatui_collections_core::field::Value;
use ratatui_collections_core::list::ListView;
use ratatui_collections_core::list::ListViewOptions;
use ratatui_collections_core::render::RenderedLine;
use ratatui_collections_core::table::ColumnSpec;
use ratatui_collections_core::table::TableView;
use ratatui_collections_core::table::TableViewOptions;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

impl Person {
    fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
        }
    }
}

impl Record for Person {
    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "Name" => Some(self.name.clone().into()),
            "Age" => Some(self.age.into()),
            _ => None,
        }
    }
}

fn people() -> Vec<Person> {
    vec![
        Person::new("Charlie", 35),
        Person::new("Alice", 30),
        Person::new("Bob", 25),
    ]
}

fn names(items: &[Person]) -> Vec<String> {
    items.iter().map(|p| p.name.clone()).collect()
}

fn people_table() -> TableView<Person> {
    TableView::new(
        vec![
            ColumnSpec::new("Name", "Name", 8),
            ColumnSpec::new("Age", "Age", 3),
        ],
        people(),
    )
}

#[test]
fn windowing_follows_selection() {
    let items: Vec<String> = (1..=100).map(|i| format!("Item {i}")).collect();
    let mut list = ListView::with_options(
        items,
        ListViewOptions {
            height: 10,
            ..Default::default()
        },
    );
    assert_eq!(list.selected(), None);

    for _ in 0..15 {
        list.move_down();
    }
    assert_eq!(list.selected(), Some(14));
    assert_eq!(list.viewport().offset(), 5);
    assert_eq!(list.visible_window(), 5..15);

    let mut expected = vec!["↑ 5 more".to_string()];
    expected.extend((6..=15).map(|i| format!("Item {i}")));
    expected.push("↓ 85 more".to_string());
    assert_eq!(list.render_display(), expected);
}

#[test]
fn render_is_idempotent() {
    let items: Vec<String> = (1..=40).map(|i| format!("row {i}")).collect();
    let mut list = ListView::new(items);
    list.move_to_last();
    list.move_up();
    let first = list.render(|s, i| format!("{i}:{s}"));
    let second = list.render(|s, i| format!("{i}:{s}"));
    assert_eq!(first, second);
    assert_eq!(list.selected(), Some(38));
}

#[test]
fn sort_toggle_and_reset() {
    let mut table = people_table();

    assert_eq!(table.sort("Name"), CollectionAction::Sorted);
    assert_eq!(table.items().with(|v| names(v)), vec!["Alice", "Bob", "Charlie"]);

    table.sort("Name");
    assert_eq!(table.items().with(|v| names(v)), vec!["Charlie", "Bob", "Alice"]);
    assert_eq!(table.sort_state().direction, SortDirection::Descending);

    table.sort("Age");
    assert_eq!(
        table.items().with(|v| v.iter().map(|p| p.age).collect::<Vec<_>>()),
        vec![25, 30, 35]
    );
    assert_eq!(table.sort_state().direction, SortDirection::Ascending);
    assert_eq!(table.sort_state().active_field.as_deref(), Some("Age"));
}

#[test]
fn sorting_twice_reverses_order() {
    let items: Vec<Person> = [7u32, 3, 9, 1, 5]
        .iter()
        .map(|&a| Person::new(&format!("p{a}"), a))
        .collect();
    let mut list = ListView::new(items);
    list.sort("Age");
    let once = list.items().get();
    list.sort("Age");
    let mut twice = list.items().get();
    twice.reverse();
    assert_eq!(once, twice);
}

#[test]
fn single_item_boundaries() {
    let mut list = ListView::new(vec!["only".to_string()]);
    list.move_up();
    assert_eq!(list.selected(), Some(0));
    list.move_down();
    assert_eq!(list.selected(), Some(0));
    list.move_up();
    assert_eq!(list.selected(), Some(0));
}

#[test]
fn unknown_sort_field_is_lenient() {
    let mut table = people_table();
    assert_eq!(table.sort("Missing"), CollectionAction::Sorted);
    assert_eq!(table.items().with(|v| names(v)), vec!["Charlie", "Alice", "Bob"]);
    assert_eq!(
        table.try_sort("Missing"),
        Err(Error::UnknownField("Missing".into()))
    );

    let mut list = ListView::new(people());
    list.sort("Missing");
    assert_eq!(list.items().with(|v| names(v)), vec!["Charlie", "Alice", "Bob"]);
    assert!(list.try_sort("Missing").is_err());
    assert_eq!(list.try_sort("Name"), Ok(CollectionAction::Sorted));
}

#[test]
fn empty_collection_ignores_everything() {
    let mut table: TableView<Person> =
        TableView::new(vec![ColumnSpec::new("Name", "Name", 8)], Vec::new());
    for name in ["keyDown", "keyUp", "keyHome", "keyEnd", "keyEnter"] {
        assert_eq!(table.dispatch(name, None), CollectionAction::None);
    }
    assert_eq!(table.dispatch("sort", Some("Name")), CollectionAction::None);
    assert_eq!(table.selected(), None);
    assert_eq!(table.sort_state().active_field, None);
    assert_eq!(table.render(), vec![RenderedLine::Header("Name    ".into())]);
}

#[test]
fn table_reports_only_on_confirm_and_list_on_every_move() {
    let seen = Rc::new(RefCell::new(Vec::new()));

    let mut table = people_table();
    let sink = Rc::clone(&seen);
    table.on_select(move |p: &Person, i| sink.borrow_mut().push((p.name.clone(), i)));
    table.dispatch("keyDown", None);
    table.dispatch("keyDown", None);
    assert!(seen.borrow().is_empty());
    assert_eq!(table.dispatch("keyEnter", None), CollectionAction::Activated(1));
    assert_eq!(*seen.borrow(), vec![("Alice".to_string(), 1)]);

    seen.borrow_mut().clear();
    let mut list = ListView::new(people());
    let sink = Rc::clone(&seen);
    list.on_select(move |p: &Person, i| sink.borrow_mut().push((p.name.clone(), i)));
    assert_eq!(list.dispatch("keyDown", None), CollectionAction::SelectionChanged(0));
    list.dispatch("keyEnd", None);
    assert_eq!(
        *seen.borrow(),
        vec![("Charlie".to_string(), 0), ("Bob".to_string(), 2)]
    );
}

#[test]
fn confirm_without_selection_is_a_noop() {
    let mut table = people_table();
    let fired = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&fired);
    table.on_select(move |_: &Person, _| *flag.borrow_mut() = true);
    assert_eq!(table.confirm(), CollectionAction::None);
    assert!(!*fired.borrow());
}

#[test]
fn table_renders_header_and_cells() {
    let mut table = TableView::with_options(
        vec![
            ColumnSpec::new("Name", "Name", 6),
            ColumnSpec::new("Age", "Age", 5),
            ColumnSpec::new("Tag", "Name", 4)
                .sortable(false)
                .render_with(|p: &Person| format!("#{}", p.name.to_lowercase())),
        ],
        people(),
        TableViewOptions {
            height: 2,
            column_separator: "|".into(),
            ..Default::default()
        },
    );
    table.sort("Age");
    table.move_down();

    assert_eq!(
        table.render_plain(),
        vec![
            "Name  |Age ▲|Tag ",
            "Bob   |25   |#bob",
            "Alice |30   |#ali",
            "↓ 1 more",
        ]
    );
}

#[test]
fn non_sortable_column_is_left_alone() {
    let mut table = TableView::new(
        vec![
            ColumnSpec::new("Name", "Name", 8).sortable(false),
            ColumnSpec::new("Age", "Age", 3),
        ],
        people(),
    );
    assert_eq!(table.sort("Name"), CollectionAction::None);
    assert_eq!(table.sort_state().active_field, None);
    assert_eq!(table.try_sort("Name"), Err(Error::NotSortable("Name".into())));
    assert_eq!(table.items().with(|v| names(v)), vec!["Charlie", "Alice", "Bob"]);
}

#[test]
fn accessor_columns_sort_by_derived_values() {
    let mut table = TableView::new(
        vec![
            ColumnSpec::new("Name", "Name", 8),
            ColumnSpec::new("Len", "name_len", 3)
                .accessor(|p: &Person| Value::from(p.name.len())),
        ],
        vec![
            Person::new("Zoe", 1),
            Person::new("Bartholomew", 2),
            Person::new("Eve", 3),
            Person::new("Alexa", 4),
        ],
    );
    table.sort("name_len");
    assert_eq!(
        table.items().with(|v| names(v)),
        vec!["Zoe", "Eve", "Alexa", "Bartholomew"]
    );
    assert_eq!(table.try_sort("name_len"), Ok(CollectionAction::Sorted));
    assert_eq!(
        table.items().with(|v| names(v)),
        vec!["Bartholomew", "Alexa", "Zoe", "Eve"]
    );
}

#[test]
fn sort_notifies_collection_observers() {
    let mut table = people_table();
    let notified = Rc::new(RefCell::new(0));
    let count = Rc::clone(&notified);
    table.items().subscribe(move |_: &Vec<Person>| *count.borrow_mut() += 1);
    table.sort("Age");
    table.sort("Missing");
    assert_eq!(*notified.borrow(), 2);
}

#[test]
fn external_shrink_is_resynced() {
    let items: Vec<String> = (0..30).map(|i| i.to_string()).collect();
    let mut list = ListView::new(items);
    list.move_to_last();
    assert_eq!(list.selected(), Some(29));

    list.items().set(vec!["a".into(), "b".into(), "c".into()]);
    assert_eq!(list.selected(), Some(2));
    assert_eq!(list.viewport().offset(), 0);
    assert_eq!(list.visible_window(), 0..3);
    assert_eq!(list.render_display(), vec!["a", "b", "c"]);

    list.move_up();
    assert_eq!(list.selected(), Some(1));
}

#[test]
fn select_callback_may_edit_the_collection() {
    let mut list = ListView::new(vec!["a".to_string(), "b".to_string()]);
    let shared = list.items().clone();
    list.on_select(move |_: &String, i| {
        shared.update(move |v: &mut Vec<String>| v[i].push('*'));
    });
    list.move_down();
    list.move_down();
    list.confirm();
    assert_eq!(list.items().get(), vec!["a*", "b**"]);
}

#[test]
fn collection_subscriber_may_write_back() {
    let mut table = people_table();
    let handle = table.items().clone();
    table.items().subscribe(move |v: &Vec<Person>| {
        if v.len() > 2 {
            handle.update(|v: &mut Vec<Person>| v.truncate(2));
        }
    });
    table.move_to_last();
    table.items().update(|v: &mut Vec<Person>| v.push(Person::new("Dora", 41)));
    assert_eq!(table.len(), 2);
    assert_eq!(table.selected(), Some(1));
    assert_eq!(table.sort("Age"), CollectionAction::Sorted);
    assert_eq!(table.items().with(|v| names(v)), vec!["Alice", "Charlie"]);
}
