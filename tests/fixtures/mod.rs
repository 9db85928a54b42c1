//! Shared mock used by the integration tests.
//!
//! `MockInbox` covers every argument shape the ledger has to handle:
//! no arguments, optional arguments, selectors, shared references, lists
//! and maps, with and without return values.

// Not every test file uses every fixture method.
#![allow(dead_code)]

use probemock::{register_call, Arg, Args0, Args1, Args2, Args3, CallHandler, Mock, Selector};
use std::collections::HashMap;
use std::rc::Rc;

pub const DEFAULT_RETURN: &str = "default return value";

#[derive(Debug, PartialEq)]
pub struct Attachment {
    pub size: i64,
}

pub trait Inbox {
    fn title(&self) -> String;
    fn draft(&self) -> Option<String>;
    fn refresh(&self);
    fn archive(&self, id: &str);
    fn search(&self, query: Option<&str>);
    fn subject(&self, id: &str) -> String;
    fn preview(&self, id: &str) -> Option<String>;
    fn open(&self, id: &str) -> Rc<Attachment>;
    fn bind(&self, id: &str, action: Option<Selector>);
    fn attach(&self, owner: Option<&Rc<Attachment>>, action: Selector, size: i64) -> String;
    fn mark_read(&self, ids: &[&str]);
    fn tag(&self, labels: &HashMap<String, String>);
    fn close(&self);
}

#[derive(Default)]
pub struct MockInbox {
    pub handler: CallHandler,
}

impl MockInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(handler: CallHandler) -> Self {
        Self { handler }
    }
}

impl Mock for MockInbox {
    fn call_handler(&self) -> &CallHandler {
        &self.handler
    }
}

impl Inbox for MockInbox {
    fn title(&self) -> String {
        register_call!(self.handler, default: DEFAULT_RETURN.to_string())
    }

    fn draft(&self) -> Option<String> {
        register_call!(self.handler, optional: None)
    }

    fn refresh(&self) {
        register_call!(self.handler)
    }

    fn archive(&self, id: &str) {
        register_call!(self.handler, args: Args1::new(Arg::value(id.to_string())))
    }

    fn search(&self, query: Option<&str>) {
        register_call!(
            self.handler,
            args: Args1::new(Arg::optional(query.map(str::to_string)))
        )
    }

    fn subject(&self, id: &str) -> String {
        register_call!(
            self.handler,
            args: Args1::new(Arg::value(id.to_string())),
            default: DEFAULT_RETURN.to_string()
        )
    }

    fn preview(&self, id: &str) -> Option<String> {
        register_call!(
            self.handler,
            args: Args1::new(Arg::value(id.to_string())),
            optional: None
        )
    }

    fn open(&self, id: &str) -> Rc<Attachment> {
        register_call!(
            self.handler,
            args: Args1::new(Arg::value(id.to_string())),
            default: Rc::new(Attachment { size: 1 })
        )
    }

    fn bind(&self, id: &str, action: Option<Selector>) {
        register_call!(
            self.handler,
            args: Args2::new(Arg::value(id.to_string()), Arg::object_optional(action))
        )
    }

    fn attach(&self, owner: Option<&Rc<Attachment>>, action: Selector, size: i64) -> String {
        let owner = owner.map_or(Arg::nil(), Arg::shared);
        register_call!(
            self.handler,
            args: Args3::new(owner, Arg::object(action), Arg::value(size)),
            default: DEFAULT_RETURN.to_string()
        )
    }

    fn mark_read(&self, ids: &[&str]) {
        register_call!(
            self.handler,
            args: Args1::new(Arg::list(ids.iter().map(|id| id.to_string())))
        )
    }

    fn tag(&self, labels: &HashMap<String, String>) {
        register_call!(self.handler, args: Args1::new(Arg::map(labels)))
    }

    fn close(&self) {
        // Deliberately not forwarded to the handler.
    }
}

/// A mocked method keyed explicitly instead of by its function name.
pub fn unread_count(mock: &MockInbox) -> u32 {
    mock.handler
        .register_call_returning("inbox.unread_count", Args0, 0)
}

pub fn tap() -> Selector {
    Selector::new("didTap:")
}
