//! Menu rendering and order entry/edit prompts.

use chrono::NaiveDate;

use floorcraft_core::dates::display_date;
use floorcraft_core::order::{MAX_AREA, MIN_AREA, Order};
use floorcraft_core::{Product, State};

use crate::io::UserIo;

pub fn welcome_banner(io: &mut impl UserIo) {
    io.print("* * * * * * * * * * * * * * * * * * * *");
    io.print("*           FLOORCRAFT ORDERS         *");
    io.print("* * * * * * * * * * * * * * * * * * * *");
}

pub fn exit_banner(io: &mut impl UserIo) {
    io.print("Goodbye.");
}

pub fn main_menu(io: &mut impl UserIo) {
    io.print("");
    io.print("1. Display Orders");
    io.print("2. Add an Order");
    io.print("3. Edit an Order");
    io.print("4. Remove an Order");
    io.print("5. Export All Data");
    io.print("6. Quit");
}

pub fn display_orders(io: &mut impl UserIo, date: NaiveDate, orders: &[Order]) {
    io.print(&format!("=== Orders for {} ===", display_date(date)));
    for order in orders {
        display_order(io, order);
    }
}

pub fn display_order(io: &mut impl UserIo, order: &Order) {
    io.print(&format!("Order #{}", order.order_number));
    io.print(&format!("  Customer: {}", order.customer_name));
    io.print(&format!(
        "  State: {} (tax rate {}%)",
        order.state, order.tax_rate
    ));
    io.print(&format!("  Product: {}", order.product_type));
    io.print(&format!("  Area: {} sq ft", order.area));
    io.print(&format!(
        "  Material: ${}  Labor: ${}  Tax: ${}",
        order.material_cost, order.labor_cost, order.tax
    ));
    io.print(&format!("  Total: ${}", order.total));
}

/// Prompt for every user-entered field of a new order, copying the tax
/// rate and unit costs from the chosen reference rows.
pub fn collect_new_order(
    io: &mut impl UserIo,
    states: &[State],
    products: &[Product],
    mut order: Order,
) -> Order {
    order.customer_name = io.read_name("Enter customer name:");

    for (i, state) in states.iter().enumerate() {
        io.print(&format!("{} - {}", i + 1, state.state_name));
    }
    let pick = io.read_u32_in_range("Select the order's state:", 1, states.len() as u32);
    let state = &states[pick as usize - 1];
    order.state = state.abbreviation.clone();
    order.tax_rate = state.tax_rate;

    for (i, product) in products.iter().enumerate() {
        io.print(&format!(
            "{} - {} (${}/sq ft materials, ${}/sq ft labor)",
            i + 1,
            product.product_type,
            product.cost_per_square_foot,
            product.labor_cost_per_square_foot
        ));
    }
    let pick = io.read_u32_in_range("Select a product:", 1, products.len() as u32);
    let product = &products[pick as usize - 1];
    order.product_type = product.product_type.clone();
    order.cost_per_square_foot = product.cost_per_square_foot;
    order.labor_cost_per_square_foot = product.labor_cost_per_square_foot;

    order.area = io.read_decimal_in_range(
        "Enter desired area in square feet (minimum 100):",
        MIN_AREA,
        MAX_AREA,
    );
    order
}

/// Re-prompt every editable field; an empty entry keeps the current value.
pub fn collect_order_edits(
    io: &mut impl UserIo,
    states: &[State],
    products: &[Product],
    order: &mut Order,
) {
    let name = io.read_name_allow_empty(&format!(
        "Enter customer name ({}):",
        order.customer_name
    ));
    if !name.is_empty() {
        order.customer_name = name;
    }

    for (i, state) in states.iter().enumerate() {
        io.print(&format!("{} - {}", i + 1, state.state_name));
    }
    if let Some(pick) = io.read_u32_allow_empty(
        &format!("Select the order's state ({}):", order.state),
        1,
        states.len() as u32,
    ) {
        let state = &states[pick as usize - 1];
        order.state = state.abbreviation.clone();
        order.tax_rate = state.tax_rate;
    }

    for (i, product) in products.iter().enumerate() {
        io.print(&format!("{} - {}", i + 1, product.product_type));
    }
    if let Some(pick) = io.read_u32_allow_empty(
        &format!("Select a product ({}):", order.product_type),
        1,
        products.len() as u32,
    ) {
        let product = &products[pick as usize - 1];
        order.product_type = product.product_type.clone();
        order.cost_per_square_foot = product.cost_per_square_foot;
        order.labor_cost_per_square_foot = product.labor_cost_per_square_foot;
    }

    if let Some(area) = io.read_decimal_allow_empty(
        &format!("Enter area ({}):", order.area),
        MIN_AREA,
        MAX_AREA,
    ) {
        order.area = area;
    }
}
