use proptest::prelude::*;
use ratatui_collections_core::events::Command;
use ratatui_collections_core::field::Record;
use ratatui_collections_core::field::Value;
use ratatui_collections_core::list::ListView;
use ratatui_collections_core::list::ListViewOptions;
use ratatui_collections_core::sort::SortController;

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: i64,
    label: String,
    flag: bool,
}

impl Record for Row {
    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.into()),
            "label" => Some(self.label.as_str().into()),
            "flag" => Some(self.flag.into()),
            _ => None,
        }
    }
}

fn row() -> impl Strategy<Value = Row> {
    (any::<i64>(), "[a-z]{0,4}", any::<bool>()).prop_map(|(id, label, flag)| Row {
        id,
        label,
        flag,
    })
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => Just(Command::Down),
        4 => Just(Command::Up),
        1 => Just(Command::PageDown),
        1 => Just(Command::PageUp),
        1 => Just(Command::First),
        1 => Just(Command::Last),
        1 => Just(Command::Confirm),
        1 => prop::sample::select(vec!["id", "label", "flag", "nope"])
            .prop_map(|f| Command::Sort(f.to_string())),
    ]
}

proptest! {
    #[test]
    fn selection_stays_in_range_and_visible(
        rows in prop::collection::vec(row(), 0..60),
        height in 1usize..15,
        commands in prop::collection::vec(command(), 0..80),
    ) {
        let len = rows.len();
        let mut list = ListView::with_options(rows, ListViewOptions {
            height,
            ..Default::default()
        });
        for cmd in commands {
            list.handle_command(cmd);
            let offset = list.viewport().offset();
            prop_assert!(offset <= len.saturating_sub(height));
            match list.selected() {
                None => {}
                Some(i) => {
                    prop_assert!(i < len);
                    prop_assert!(offset <= i && i < offset + height);
                }
            }
        }
    }

    #[test]
    fn render_is_repeatable(
        rows in prop::collection::vec(row(), 0..40),
        height in 1usize..10,
        commands in prop::collection::vec(command(), 0..30),
    ) {
        let mut list = ListView::with_options(rows, ListViewOptions {
            height,
            ..Default::default()
        });
        for cmd in commands {
            list.handle_command(cmd);
        }
        let a = list.render(|r, _| format!("{}:{}", r.id, r.label));
        let b = list.render(|r, _| format!("{}:{}", r.id, r.label));
        prop_assert_eq!(&a, &b);
        let items = a.iter().filter(|l| l.is_item()).count();
        prop_assert_eq!(items, list.visible_window().len());
    }

    #[test]
    fn toggling_a_unique_key_reverses_the_order(
        ids in prop::collection::hash_set(any::<i64>(), 0..50),
    ) {
        let mut rows: Vec<Row> = ids
            .into_iter()
            .map(|id| Row { id, label: String::new(), flag: false })
            .collect();
        let mut sort = SortController::new();
        sort.apply_sort(&mut rows, "id");
        let ascending = rows.clone();
        prop_assert!(ascending.windows(2).all(|w| w[0].id < w[1].id));
        sort.apply_sort(&mut rows, "id");
        rows.reverse();
        prop_assert_eq!(rows, ascending);
    }

    #[test]
    fn switching_fields_resets_to_ascending(
        rows in prop::collection::vec(row(), 1..30),
        toggles in 0usize..4,
    ) {
        let mut rows = rows;
        let mut sort = SortController::new();
        for _ in 0..=toggles {
            sort.apply_sort(&mut rows, "label");
        }
        sort.apply_sort(&mut rows, "id");
        prop_assert_eq!(
            sort.state().direction,
            ratatui_collections_core::compare::SortDirection::Ascending
        );
        prop_assert!(rows.windows(2).all(|w| w[0].id <= w[1].id));
    }
}
