mod prelude {
    pub use yew::prelude::*;
    pub use sdpeek_common::*;
    pub use std::rc::Rc;
}

pub mod dropbox;
pub mod result;
pub mod tag;
