pub mod auth_client;
pub mod cart_client;
pub mod catalog_client;
pub mod checkout_client;
pub mod flash_sale_client;
pub mod voucher_client;

pub use auth_client::AuthClient;
pub use cart_client::CartClient;
pub use catalog_client::CatalogClient;
pub use checkout_client::CheckoutClient;
pub use flash_sale_client::{CurrentFlashSale, FlashSaleClient};
pub use voucher_client::VoucherClient;
