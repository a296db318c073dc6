use std::fmt::Display;
use std::rc::Rc;

use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub kind: ToastKind,
    pub message: String,
}

/// Oldest first
#[derive(Debug, Default, PartialEq)]
pub struct ToastQueue {
    pub items: Vec<Toast>,
    next_id: usize,
}

pub enum ToastAction {
    Push(ToastKind, String),
    Dismiss(usize),
}

/// At most this many toasts are shown; older ones are dropped
const MAX_TOASTS: usize = 4;

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        let mut next_id = self.next_id;
        match action {
            ToastAction::Push(kind, message) => {
                items.push(Toast { id: next_id, kind, message });
                next_id += 1;
                if items.len() > MAX_TOASTS {
                    items.remove(0);
                }
            }
            ToastAction::Dismiss(id) => items.retain(|toast| toast.id != id),
        }
        Rc::new(Self { items, next_id })
    }
}

/// Handle for raising toasts from anywhere below `App`
#[derive(Clone, PartialEq)]
pub struct Toaster {
    dispatcher: UseReducerDispatcher<ToastQueue>,
}

impl Toaster {
    pub fn new(dispatcher: UseReducerDispatcher<ToastQueue>) -> Self {
        Self { dispatcher }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.dispatcher.dispatch(ToastAction::Push(ToastKind::Success, message.into()));
    }

    pub fn error(&self, error: impl Display) {
        self.dispatcher.dispatch(ToastAction::Push(ToastKind::Error, error.to_string()));
    }

    pub fn dismiss(&self, id: usize) {
        self.dispatcher.dispatch(ToastAction::Dismiss(id));
    }
}

#[hook]
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster must be provided by App")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_queue_push_dismiss_and_cap() {
        let mut queue = Rc::new(ToastQueue::default());
        for n in 0..6 {
            queue = queue.reduce(ToastAction::Push(ToastKind::Error, format!("error {}", n)));
        }
        assert_eq!(queue.items.len(), MAX_TOASTS);
        assert_eq!(queue.items[0].message, "error 2");

        let id = queue.items[0].id;
        queue = queue.reduce(ToastAction::Dismiss(id));
        assert_eq!(queue.items.len(), MAX_TOASTS - 1);
        assert!(queue.items.iter().all(|toast| toast.id != id));
    }
}
