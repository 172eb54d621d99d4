//! Render output of a component.
//!
//! A [`View`] is a plain tree handed to the host after every composition.
//! Interactive elements carry a key so the host can route events to their handlers.

use std::{borrow::Cow, fmt, rc::Rc};

/// Click handler of a [`View::Button`].
pub type OnClick = Rc<dyn Fn()>;

/// Input handler of a [`View::Input`].
pub type OnInput = Rc<dyn Fn(String)>;

/// View tree.
#[derive(Clone, Default)]
pub enum View {
    /// Nothing.
    #[default]
    Empty,
    /// Line of text.
    Text(Cow<'static, str>),
    /// Section heading.
    Heading(Cow<'static, str>),
    /// Button.
    Button {
        /// Key used to route clicks.
        key: Cow<'static, str>,
        /// Label.
        label: Cow<'static, str>,
        /// Click handler.
        on_click: OnClick,
    },
    /// Text input, two-way bound to its value.
    Input {
        /// Key used to route input.
        key: Cow<'static, str>,
        /// Current value.
        value: String,
        /// Placeholder shown while the value is empty.
        placeholder: Cow<'static, str>,
        /// Input handler.
        on_input: OnInput,
    },
    /// List of items.
    List(Vec<View>),
    /// Group of views rendered in order.
    Group(Vec<View>),
}

impl View {
    /// Create a text view.
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Text(text.into())
    }

    /// Create a heading view.
    pub fn heading(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Heading(text.into())
    }

    /// Create a button.
    pub fn button(
        key: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
        on_click: impl Fn() + 'static,
    ) -> Self {
        Self::Button {
            key: key.into(),
            label: label.into(),
            on_click: Rc::new(on_click),
        }
    }

    /// Create a text input.
    pub fn input(
        key: impl Into<Cow<'static, str>>,
        value: impl Into<String>,
        on_input: impl Fn(String) + 'static,
    ) -> Self {
        Self::Input {
            key: key.into(),
            value: value.into(),
            placeholder: Cow::Borrowed(""),
            on_input: Rc::new(on_input),
        }
    }

    /// Set the placeholder of an input. Other views are returned unchanged.
    pub fn placeholder(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        if let Self::Input { placeholder, .. } = &mut self {
            *placeholder = text.into();
        }
        self
    }

    /// Create a list from an iterator of views.
    pub fn list(items: impl IntoIterator<Item = View>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Create a group from an iterator of views.
    pub fn group(items: impl IntoIterator<Item = View>) -> Self {
        Self::Group(items.into_iter().collect())
    }

    /// Render `make_view` only if `condition` is true.
    pub fn when(condition: bool, make_view: impl FnOnce() -> View) -> Self {
        if condition {
            make_view()
        } else {
            Self::Empty
        }
    }

    /// Returns `true` if this view renders nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Group(items) => items.iter().all(View::is_empty),
            _ => false,
        }
    }

    /// Find the click handler of the button with `key`.
    pub fn find_button(&self, key: &str) -> Option<OnClick> {
        self.find_map(&mut |view| match view {
            Self::Button {
                key: k, on_click, ..
            } if k == key => Some(on_click.clone()),
            _ => None,
        })
    }

    /// Find the input handler of the input with `key`.
    pub fn find_input(&self, key: &str) -> Option<OnInput> {
        self.find_map(&mut |view| match view {
            Self::Input {
                key: k, on_input, ..
            } if k == key => Some(on_input.clone()),
            _ => None,
        })
    }

    /// Find the label of the button with `key`.
    pub fn button_label(&self, key: &str) -> Option<&str> {
        match self {
            Self::Button { key: k, label, .. } if k == key => Some(label),
            Self::List(items) | Self::Group(items) => {
                items.iter().find_map(|item| item.button_label(key))
            }
            _ => None,
        }
    }

    /// Find the current value of the input with `key`.
    pub fn input_value(&self, key: &str) -> Option<&str> {
        match self {
            Self::Input { key: k, value, .. } if k == key => Some(value),
            Self::List(items) | Self::Group(items) => {
                items.iter().find_map(|item| item.input_value(key))
            }
            _ => None,
        }
    }

    /// Collect every text and heading in this view, in render order.
    pub fn texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        self.collect_texts(&mut texts);
        texts
    }

    /// Returns `true` if any text or heading in this view contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| text.contains(needle))
    }

    fn collect_texts<'a>(&'a self, texts: &mut Vec<&'a str>) {
        match self {
            Self::Text(text) | Self::Heading(text) => texts.push(text),
            Self::List(items) | Self::Group(items) => {
                for item in items {
                    item.collect_texts(texts);
                }
            }
            _ => {}
        }
    }

    fn find_map<T>(&self, f: &mut dyn FnMut(&View) -> Option<T>) -> Option<T> {
        if let Some(found) = f(self) {
            return Some(found);
        }

        match self {
            Self::List(items) | Self::Group(items) => {
                items.iter().find_map(|item| item.find_map(&mut *f))
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize, bullet: bool) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let marker = if bullet { "- " } else { "" };

        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => writeln!(f, "{indent}{marker}{text}"),
            Self::Heading(text) => writeln!(f, "{indent}{marker}# {text}"),
            Self::Button { key, label, .. } => writeln!(f, "{indent}{marker}[{label}] ({key})"),
            Self::Input {
                key,
                value,
                placeholder,
                ..
            } => {
                if value.is_empty() {
                    writeln!(f, "{indent}{marker}<{placeholder}> ({key})")
                } else {
                    writeln!(f, "{indent}{marker}<{value}> ({key})")
                }
            }
            Self::List(items) => {
                for item in items {
                    item.render(f, depth, true)?;
                }
                Ok(())
            }
            Self::Group(items) => {
                let depth = if bullet { depth + 1 } else { depth };
                for item in items {
                    item.render(f, depth, false)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0, false)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Heading(text) => f.debug_tuple("Heading").field(text).finish(),
            Self::Button { key, label, .. } => f
                .debug_struct("Button")
                .field("key", key)
                .field("label", label)
                .finish_non_exhaustive(),
            Self::Input { key, value, .. } => f
                .debug_struct("Input")
                .field("key", key)
                .field("value", value)
                .finish_non_exhaustive(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Group(items) => f.debug_tuple("Group").field(items).finish(),
        }
    }
}

impl From<&'static str> for View {
    fn from(text: &'static str) -> Self {
        Self::text(text)
    }
}

impl From<String> for View {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}
