use crate::{list::render, prelude::*};

/// Filterable todo list.
///
/// Inputs: `todo.new`, `todo.query`.
/// Buttons: `todo.add`, `todo.remove.<id>`.
#[derive(Clone, Debug)]
pub struct TodoList {
    /// Texts the list starts with.
    pub seed: Vec<String>,
}

impl Default for TodoList {
    fn default() -> Self {
        Self {
            seed: ListManager::seeded()
                .items()
                .iter()
                .map(|item| item.text.clone())
                .collect(),
        }
    }
}

impl Component for TodoList {
    fn compose(&self, cx: &Scope) -> View {
        let list = use_store(cx, || ListManager::from_texts(self.seed.clone()));
        let draft = use_store(cx, String::new);
        let filtered = use_computed(cx, &list, |list| {
            list.filtered().into_iter().cloned().collect::<Vec<_>>()
        });

        let set_draft = draft.clone();
        let add = {
            let list = list.clone();
            let draft = draft.clone();
            move || {
                let text = draft.get();
                if text.trim().is_empty() {
                    return;
                }

                list.update(move |list| {
                    let _id = list.add(text);

                    #[cfg(feature = "tracing")]
                    tracing::debug!("Added item {:?}", _id);
                });
                draft.set(String::new());
            }
        };
        let set_query = list.clone();

        list.with(|manager| {
            let (visible, items) = filtered.with(|filtered| {
                let items = render(filtered, "", |item| {
                    let list = list.clone();
                    let id = item.id;

                    View::group([
                        View::text(item.to_string()),
                        View::button(format!("todo.remove.{id}"), "Remove", move || {
                            list.update(move |list| {
                                list.remove(id);
                            })
                        }),
                    ])
                });
                (filtered.len(), items)
            });

            View::group([
                View::heading("Todo"),
                View::input("todo.new", draft.get(), move |text| set_draft.set(text))
                    .placeholder("New item"),
                View::button("todo.add", "Add", add),
                View::input("todo.query", manager.query(), move |query| {
                    set_query.update(move |list| list.set_query(query))
                })
                .placeholder("Search"),
                View::text(format!("Showing {} of {}", visible, manager.len())),
                items,
            ])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TodoList;
    use crate::{list::EMPTY_MESSAGE, prelude::*};

    #[test]
    fn it_adds_removes_and_filters() {
        let mut composer = Composer::new(TodoList::default());
        let view = composer.mount().unwrap();
        assert!(view.contains_text("Showing 3 of 3"));

        composer
            .dispatch(Event::input("todo.new", "Fourth item"))
            .unwrap();
        let view = composer.dispatch(Event::click("todo.add")).unwrap();
        assert!(view.contains_text("4. Fourth item"));
        assert_eq!(view.input_value("todo.new"), Some(""));

        let view = composer.dispatch(Event::click("todo.remove.2")).unwrap();
        assert!(!view.contains_text("Second item"));
        assert!(view.contains_text("Showing 3 of 3"));

        let view = composer.dispatch(Event::input("todo.query", "FOURTH")).unwrap();
        assert_eq!(view.input_value("todo.query"), Some("FOURTH"));
        assert!(view.contains_text("Showing 1 of 3"));
        assert!(view.contains_text("4. Fourth item"));
        assert!(!view.contains_text("First item"));
    }

    #[test]
    fn it_keeps_the_filter_across_edits() {
        let mut composer = Composer::new(TodoList::default());
        composer.mount().unwrap();
        composer.dispatch(Event::input("todo.query", "item")).unwrap();

        composer.dispatch(Event::input("todo.new", "Milk")).unwrap();
        let view = composer.dispatch(Event::click("todo.add")).unwrap();
        assert!(view.contains_text("Showing 3 of 4"));
        assert!(!view.contains_text("4. Milk"));

        let view = composer.dispatch(Event::click("todo.remove.1")).unwrap();
        assert!(view.contains_text("Showing 2 of 3"));
        assert!(view.find_button("todo.remove.1").is_none());
        assert!(view.contains_text("2. Second item"));
    }

    #[test]
    fn it_ignores_blank_drafts() {
        let mut composer = Composer::new(TodoList::default());
        composer.mount().unwrap();

        composer.dispatch(Event::input("todo.new", "   ")).unwrap();
        let view = composer.dispatch(Event::click("todo.add")).unwrap();
        assert!(view.contains_text("Showing 3 of 3"));
        assert_eq!(view.input_value("todo.new"), Some("   "));
    }

    #[test]
    fn it_renders_an_empty_state() {
        let mut composer = Composer::new(TodoList { seed: Vec::new() });
        let view = composer.mount().unwrap();
        assert!(view.contains_text(EMPTY_MESSAGE));

        composer.dispatch(Event::input("todo.new", "X")).unwrap();
        let view = composer.dispatch(Event::click("todo.add")).unwrap();
        assert!(view.contains_text("1. X"));
        assert!(!view.contains_text(EMPTY_MESSAGE));
    }

    #[test]
    fn it_rejects_unknown_targets() {
        let mut composer = Composer::new(TodoList::default());
        composer.mount().unwrap();

        let error = composer
            .dispatch(Event::click("todo.remove.42"))
            .unwrap_err();
        assert!(matches!(error, ComposeError::UnknownTarget(key) if key == "todo.remove.42"));
    }
}
