pub(crate) mod admin_cleanup;
pub(crate) mod board_page;
pub(crate) mod pagination;
pub(crate) mod post_detail;
pub(crate) mod post_editor;
