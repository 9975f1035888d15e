//! Example: Write .xls files from tables of mixed values

use rook_sheets_xls::{write_to_file, XlsResult, XlsWriteOptions, XlsWriter};

fn main() -> XlsResult<()> {
    // One-call convenience
    let data = vec![
        vec!["Name".into(), "Age".into(), "City".into()],
        vec!["Alice".into(), 30.into(), "Tokyo".into()],
        vec!["Bob".into(), 25.into(), "Osaka".into()],
        vec!["Charlie".into(), 35.into(), "Kyoto".into()],
    ];
    write_to_file("/tmp/simple.xls", data, XlsWriteOptions::default())?;
    println!("Created /tmp/simple.xls");

    // Custom sheet name
    let products = vec![
        vec!["Product".into(), "Price".into(), "Stock".into()],
        vec!["Apple".into(), 100.into(), 50.into()],
        vec!["Banana".into(), 80.into(), 100.into()],
        vec!["Orange".into(), 120.into(), 30.into()],
    ];
    let options = XlsWriteOptions {
        sheet_name: Some("Product List".into()),
    };
    write_to_file("/tmp/products.xls", products, options)?;
    println!("Created /tmp/products.xls");

    // Writer for more control
    let mut writer = XlsWriter::new();
    writer.set_sheet_name("Sales Report");
    writer.set_data(vec![
        vec!["Month".into(), "Sales".into(), "Profit".into()],
        vec!["January".into(), 1000.5.into(), 250.25.into()],
        vec!["February".into(), 1200.into(), 300.into()],
        vec!["March".into(), true.into(), (-42).into()],
    ]);
    writer.save_as("/tmp/sales.xls")?;
    writer.close();
    println!("Created /tmp/sales.xls");

    Ok(())
}
