pub mod cart;
pub mod order;
pub mod product;
pub mod user;
pub mod voucher;

pub use cart::{CartLine, CartSnapshot};
pub use order::{CheckoutRequest, OrderPlacement, PaymentConfirmation, PaymentMethod};
pub use product::{FlashSale, FlashSaleItem, Product, ProductPage};
pub use user::{LoginRequest, UserProfile};
pub use voucher::{Voucher, VoucherKind};
