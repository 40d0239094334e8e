pub mod audio;
pub mod image;
pub mod paginator;

use std::cell::RefCell;
use std::rc::Rc;

pub use audio::{AudioView, PlaybackState};
pub use image::ImageView;
pub use paginator::{AudioSliceFactory, ItemView, ItemViewFactory, ResultPaginator};

use crate::console::bus::MessageBus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Image,
    Audio,
    Results,
}

/// The single mounted view. Views that registered bus subscriptions are
/// shared with the bus and must be torn down before a replacement is
/// installed; the image view allocates nothing and needs no teardown.
pub enum ActiveView {
    Image(ImageView),
    Audio(Rc<RefCell<AudioView>>),
    Results(Rc<RefCell<ResultPaginator>>),
}

impl ActiveView {
    pub fn kind(&self) -> ViewKind {
        match self {
            ActiveView::Image(_) => ViewKind::Image,
            ActiveView::Audio(_) => ViewKind::Audio,
            ActiveView::Results(_) => ViewKind::Results,
        }
    }

    pub fn destroy(&self, bus: &MessageBus) {
        match self {
            ActiveView::Image(_) => {}
            ActiveView::Audio(view) => view.borrow().destroy(bus),
            ActiveView::Results(view) => view.borrow().destroy(bus),
        }
    }
}
