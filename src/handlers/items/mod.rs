// handlers/items/mod.rs - Owner-scoped item CRUD
//
// Every handler passes the authenticated caller down to ItemService; items
// belonging to anyone else are reported as 404.

pub mod create; // POST /items/
pub mod delete; // DELETE /items/:id
pub mod list;   // GET /items/
pub mod show;   // GET /items/:id
pub mod update; // PUT /items/:id

pub use create::item_create;
pub use delete::item_delete;
pub use list::item_list;
pub use show::item_show;
pub use update::item_update;
