use std::sync::Arc;

use taginject::prelude::*;

#[derive(Default, Inject)]
struct Forms {
    untagged: String,
    #[inject]
    marker: i32,
    #[inject("value")]
    valued: u8,
    #[inject = "value"]
    name_value: u16,
    #[inject(custom)]
    custom_marker: i64,
    #[inject(custom = "value")]
    custom_valued: u64,
    #[inject("value", custom = "other", more)]
    combined: bool,
    #[inject("value")]
    #[inject(custom = "other")]
    spread: char,
    #[inject()]
    empty: f32,
    #[inject(skip)]
    skipped: std::cell::Cell<u8>,
    shared: Arc<String>,
}

#[derive(Default, Inject)]
struct Tuple(#[inject("first")] String, Arc<i32>);

#[derive(Inject)]
struct Unit;

#[derive(Default, Inject)]
struct Generic<T>
where
    T: Default,
{
    #[inject("value")]
    value: T,
}

fn main() {
    assert_eq!(<Forms as Inject>::fields().len(), 10);
    assert_eq!(<Tuple as Inject>::fields().len(), 2);
    assert!(<Unit as Inject>::fields().is_empty());
    assert_eq!(<Generic<String> as Inject>::fields().len(), 1);
}
