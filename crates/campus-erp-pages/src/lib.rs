//! # campus-erp-pages
//!
//! The page layer: the generic table shell ([`table`]), the CRUD page
//! controller that every management screen instantiates ([`page::CrudPage`]),
//! user notices ([`notices`]), and the entity registry that turns the one
//! controller into the ERP's screens ([`entities`]).

pub mod entities;
pub mod notices;
pub mod page;
pub mod table;

pub use entities::EntityDef;
pub use notices::{Notice, NoticeLevel, Notices};
pub use page::{CrudPage, PageState};
pub use table::{ColumnDef, ListQuery, Pagination, TableState};
