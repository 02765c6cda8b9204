//! The interactive session: menu loop, order flows, error policy.
//!
//! Recoverable errors are reported and the loop continues; a persistence
//! failure ends the session.

use tracing::{debug, error};

use floorcraft_core::Order;
use floorcraft_core::error::DomainResult;
use floorcraft_store::{LedgerAction, OrderService};

use crate::io::UserIo;
use crate::view;

pub struct Controller<Io> {
    service: OrderService,
    io: Io,
}

impl<Io: UserIo> Controller<Io> {
    pub fn new(service: OrderService, io: Io) -> Self {
        Self { service, io }
    }

    /// Run the menu loop until the user quits or persistence fails.
    pub fn run(&mut self) -> DomainResult<()> {
        view::welcome_banner(&mut self.io);

        loop {
            view::main_menu(&mut self.io);
            let selection = self.io.read_u32_in_range("Please make a selection:", 1, 6);
            debug!(selection, "menu selection");

            let result = match selection {
                1 => self.display_orders(),
                2 => self.add_order(),
                3 => self.edit_order(),
                4 => self.remove_order(),
                5 => self.export_data(),
                _ => break,
            };

            if let Err(e) = result {
                self.io.print(&e.to_string());
                if e.is_fatal() {
                    error!(%e, "persistence failure, ending session");
                    return Err(e);
                }
            }
        }

        view::exit_banner(&mut self.io);
        Ok(())
    }

    fn display_orders(&mut self) -> DomainResult<()> {
        let date = self.io.read_date("Enter the order date (MM-DD-YYYY):");
        self.service.route(date, LedgerAction::Display)?;
        let orders = self.service.orders_for(LedgerAction::Display)?.to_vec();
        view::display_orders(&mut self.io, date, &orders);
        Ok(())
    }

    fn add_order(&mut self) -> DomainResult<()> {
        self.io.print("=== Add an Order ===");
        let date = self.io.read_date("Enter the order date (MM-DD-YYYY):");
        self.service.validate_order_date(date)?;
        self.service.route(date, LedgerAction::Add)?;

        let order = Order::new(self.service.next_order_number()?);
        let order = view::collect_new_order(
            &mut self.io,
            self.service.states(),
            self.service.products(),
            order,
        );

        // The prompts constrain choices to listed rows; re-check anyway.
        self.service.validate_state(&order.state)?;
        self.service.validate_product(&order.product_type)?;

        let order = self.service.price(order);
        view::display_order(&mut self.io, &order);

        if self.io.read_yes_no("Place this order? (Y/N):") {
            self.service.place_order(order, date)?;
            self.io.print("Order placed.");
        } else {
            // An aborted first order must not leave an empty ledger file.
            self.service.delete_ledger_if_empty()?;
            self.io.print("Order canceled.");
        }
        Ok(())
    }

    fn edit_order(&mut self) -> DomainResult<()> {
        self.io.print("=== Edit an Order ===");
        let date = self.io.read_date("Enter the order date (MM-DD-YYYY):");
        self.service.route(date, LedgerAction::Edit)?;
        self.service.orders_for(LedgerAction::Edit)?;

        let number = self.io.read_u32_in_range("Enter the order number:", 1, u32::MAX);
        let snapshot = self.service.order(number)?.clone();

        let mut draft = snapshot.clone();
        view::collect_order_edits(
            &mut self.io,
            self.service.states(),
            self.service.products(),
            &mut draft,
        );
        self.service.validate_state(&draft.state)?;
        self.service.validate_product(&draft.product_type)?;

        if draft == snapshot {
            self.io.print("No information was changed.");
            return Ok(());
        }

        let draft = self.service.price(draft);
        view::display_order(&mut self.io, &draft);

        if self.io.read_yes_no("Save these changes? (Y/N):") {
            *self.service.order_mut(number)? = draft;
            self.service.store_edited_order(number, date)?;
            self.io.print("Order updated.");
        } else {
            self.io.print("Edit canceled.");
        }
        Ok(())
    }

    fn remove_order(&mut self) -> DomainResult<()> {
        self.io.print("=== Remove an Order ===");
        let date = self.io.read_date("Enter the order date (MM-DD-YYYY):");
        self.service.route(date, LedgerAction::Remove)?;
        self.service.orders_for(LedgerAction::Remove)?;

        let number = self.io.read_u32_in_range("Enter the order number:", 1, u32::MAX);
        let order = self.service.order(number)?.clone();
        view::display_order(&mut self.io, &order);

        if self.io.read_yes_no("Remove this order? (Y/N):") {
            self.service.remove_order(number, date)?;
            // Removing the last order retires the date's ledger file.
            self.service.delete_ledger_if_empty()?;
            self.io.print("Order removed.");
        } else {
            self.io.print("Removal canceled.");
        }
        Ok(())
    }

    fn export_data(&mut self) -> DomainResult<()> {
        let rows = self.service.export_all()?;
        self.io.print(&format!("Exported {rows} orders."));
        Ok(())
    }
}
