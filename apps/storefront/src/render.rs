//! # Text Rendering
//!
//! Turns command responses into the text the terminal shows. No state, no
//! I/O: every function maps a response to a `String`.

use std::fmt::Write;

use crate::commands::modal::ModalResponse;
use crate::commands::product::{CategoriesResponse, GridResponse};
use crate::error::ApiError;
use crate::state::CartResponse;

pub const NO_PRODUCTS: &str = "No products found.";
pub const EMPTY_CART: &str = "Your cart is empty.";

/// The product grid with its "load more" hint.
pub fn grid(response: &GridResponse) -> String {
    if response.no_results {
        return NO_PRODUCTS.to_string();
    }

    let mut out = String::new();
    for card in &response.items {
        let _ = writeln!(
            out,
            "[{}] {} | {} | {}",
            card.id, card.title, card.price, card.category
        );
    }

    let _ = write!(
        out,
        "Showing {} of {}.",
        response.items.len(),
        response.filtered_count
    );
    if response.has_more {
        out.push_str(" Type `more` to load more.");
    }
    out
}

/// The cart panel and its total.
pub fn cart(response: &CartResponse) -> String {
    let mut out = String::new();

    if response.is_empty() {
        out.push_str(EMPTY_CART);
        out.push('\n');
    }

    for line in &response.items {
        let _ = writeln!(out, "[{}] {}", line.product_id, line.title);
        let _ = writeln!(out, "    {} x {} = {}", line.unit_price, line.qty, line.subtotal);
    }

    let _ = write!(out, "Total: {}", response.totals.total);
    out
}

/// The preview modal, or a note that it is closed.
pub fn modal(response: &ModalResponse) -> String {
    let product = match (&response.product, response.visible) {
        (Some(product), true) => product,
        _ => return "Preview closed.".to_string(),
    };

    format!(
        "{}\nPrice: {}\nCategory: {}\nImage: {}\ntransform: {}; transform-origin: {}",
        product.title,
        product.price,
        product.category,
        product.image,
        response.transform,
        response.transform_origin
    )
}

/// The category selector; the selected entry is starred.
pub fn categories(response: &CategoriesResponse) -> String {
    let options: Vec<String> = response
        .options
        .iter()
        .map(|option| {
            if *option == response.selected {
                format!("{}*", option)
            } else {
                option.clone()
            }
        })
        .collect();
    format!("Categories: {}", options.join(", "))
}

/// Transient notice after a successful add.
pub fn added_notice(title: &str) -> String {
    format!("{} added to cart", title)
}

pub fn error(err: &ApiError) -> String {
    match err.code {
        crate::error::ErrorCode::CatalogUnavailable => "Catalog unavailable.".to_string(),
        _ => err.to_string(),
    }
}

pub fn help() -> String {
    [
        "Commands:",
        "  show                  show the product grid",
        "  search <text>         filter by title (empty clears)",
        "  category <name|all>   filter by category",
        "  categories            list categories",
        "  sort <none|low-high|high-low>",
        "  more                  load more products",
        "  add <id>              add a product to the cart",
        "  inc <id> / dec <id>   change a cart quantity",
        "  clear                 empty the cart",
        "  cart                  show the cart",
        "  open <id>             open the preview",
        "  wheel <delta>         zoom (negative in, positive out)",
        "  move <x> <y>          pan while zoomed (0-100)",
        "  click                 reset zoom",
        "  close                 close the preview",
        "  help / quit",
    ]
    .join("\n")
}
