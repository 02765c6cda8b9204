//! Scripted end-to-end sessions: the controller driven through an
//! in-memory terminal against a real temp-directory store.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use tempfile::TempDir;

use floorcraft_cli::{ConsoleIo, Controller};
use floorcraft_store::{OrderService, StorePaths};

fn seeded_root() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();
    fs::create_dir_all(root.join("data")).unwrap();
    fs::write(
        root.join("data").join("Taxes.txt"),
        "State,StateName,TaxRate\n\
         TX,Texas,4.45\n\
         WA,Washington,9.25\n\
         KY,Kentucky,6.00\n\
         CA,California,25.00\n",
    )
    .unwrap();
    fs::write(
        root.join("data").join("Products.txt"),
        "ProductType,CostPerSquareFoot,LaborCostPerSquareFoot\n\
         Carpet,2.25,2.10\n\
         Laminate,1.75,2.10\n\
         Tile,3.50,4.15\n\
         Wood,5.15,4.75\n",
    )
    .unwrap();
    (dir, root)
}

fn run_session(root: &PathBuf, script: &str) -> String {
    let service = OrderService::bootstrap(StorePaths::new(root)).unwrap();
    let mut output = Vec::new();
    {
        let io = ConsoleIo::new(Cursor::new(script.to_string()), &mut output);
        let mut controller = Controller::new(service, io);
        controller.run().unwrap();
    }
    String::from_utf8(output).unwrap()
}

#[test]
fn add_display_remove_and_quit() {
    let (_dir, root) = seeded_root();

    // 2: add, far-future date, name, state 1 (TX), product 3 (Tile),
    //    area 250, confirm.
    // 1: display that date.
    // 4: remove order 1, confirm.
    // 1: display again, now an error the loop survives.
    // 6: quit.
    let script = "2\n01-01-2097\nAda Lovelace\n1\n3\n250\ny\n\
                  1\n01-01-2097\n\
                  4\n01-01-2097\n1\ny\n\
                  1\n01-01-2097\n\
                  6\n";
    let output = run_session(&root, script);

    assert!(output.contains("Order placed."));
    assert!(output.contains("Ada Lovelace"));
    assert!(output.contains("Order removed."));
    // The post-removal display fails recoverably and the session goes on.
    assert!(output.contains("there are no orders for 2097-01-01"));
    assert!(output.contains("Goodbye."));

    // Removing the only order retired the ledger file.
    assert!(!root.join("orders").join("Orders_01012097.txt").exists());

    // Both mutations made the audit trail.
    let audit = fs::read_to_string(root.join("audits").join("Audit_01012097.txt")).unwrap();
    assert!(audit.contains("placed order number 1"));
    assert!(audit.contains("removed order number 1"));
}

#[test]
fn aborting_the_first_order_leaves_no_ledger_file() {
    let (_dir, root) = seeded_root();

    // Walk the add flow but answer N at the confirmation.
    let script = "2\n01-01-2097\nAda Lovelace\n1\n3\n250\nn\n6\n";
    let output = run_session(&root, script);

    assert!(output.contains("Order canceled."));
    assert!(!root.join("orders").join("Orders_01012097.txt").exists());
}

#[test]
fn past_dates_are_rejected_for_new_orders() {
    let (_dir, root) = seeded_root();

    // The add flow refuses a long-past date before prompting for fields;
    // the loop continues to quit.
    let script = "2\n01-01-2001\n6\n";
    let output = run_session(&root, script);

    assert!(output.contains("new orders cannot be added to past dates"));
    assert!(!root.join("orders").join("Orders_01012001.txt").exists());
}

#[test]
fn editing_an_order_recalculates_its_prices() {
    let (_dir, root) = seeded_root();

    // Add 100 sq ft of Carpet in KY, then edit only the area to 150.
    // Empty entries keep the name, state and product.
    let script = "2\n01-01-2097\nKara Thrace\n3\n1\n100\ny\n\
                  3\n01-01-2097\n1\n\n\n\n150\ny\n\
                  6\n";
    let output = run_session(&root, script);
    assert!(output.contains("Order updated."));

    let ledger =
        fs::read_to_string(root.join("orders").join("Orders_01012097.txt")).unwrap();
    // 150 * 2.25 = 337.50 materials, 150 * 2.10 = 315.00 labor,
    // 6% of 652.50 = 39.15, total 691.65.
    assert!(ledger.contains("1,Kara Thrace,KY,6.00,Carpet,150,2.25,2.10,337.50,315.00,39.15,691.65"));
}
