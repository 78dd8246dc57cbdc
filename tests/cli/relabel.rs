use anyhow::Result;

use crate::{CliTest, VALUESET_XML};

#[test]
fn replaces_labels_with_a_csv_mapping() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("valueset.xml", VALUESET_XML)?;
    test.write_file("mapping.csv", "original,replacement\nRed,Rouge\n")?;

    let output = test.relabel_command("valueset.xml", "mapping.csv").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Loaded 1 replacement entries"), "{stdout}");
    assert!(stdout.contains("Found 2 customValue elements"), "{stdout}");
    assert!(stdout.contains("Replaced: 1"), "{stdout}");
    assert!(stdout.contains("Not found: 1"), "{stdout}");

    let converted = test.read_file("output/valueset_converted.xml")?;
    assert!(converted.contains("<fullName>Rouge</fullName>"), "{converted}");
    assert!(converted.contains("<fullName>Blue</fullName>"), "{converted}");
    Ok(())
}

#[test]
fn replaces_labels_with_a_json_mapping() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("valueset.xml", VALUESET_XML)?;
    test.write_file("mapping.json", r#"{"Red": "Rouge", "Blue": "Bleu"}"#)?;

    let output = test.relabel_command("valueset.xml", "mapping.json").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Replaced: 2"), "{stdout}");
    assert!(stdout.contains("Not found: 0"), "{stdout}");

    let converted = test.read_file("output/valueset_converted.xml")?;
    assert!(converted.contains("<fullName>Rouge</fullName>"), "{converted}");
    assert!(converted.contains("<fullName>Bleu</fullName>"), "{converted}");
    Ok(())
}

#[test]
fn dry_run_reports_without_writing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("valueset.xml", VALUESET_XML)?;
    test.write_file("mapping.csv", "original,replacement\nRed,Rouge\n")?;

    let output = test
        .relabel_command("valueset.xml", "mapping.csv")
        .arg("--dry-run")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Replaced: 1"), "{stdout}");
    assert!(stdout.contains("Dry run: no file was written"), "{stdout}");
    assert!(!test.root().join("output").exists());
    Ok(())
}

#[test]
fn keeps_the_namespace_without_a_synthetic_prefix() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "valueset.xml",
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <GlobalValueSet xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n    \
         <customValue>\n        <fullName>Red</fullName>\n    </customValue>\n\
         </GlobalValueSet>\n",
    )?;
    test.write_file("mapping.json", r#"{"Red": "Rouge"}"#)?;

    let output = test.relabel_command("valueset.xml", "mapping.json").output()?;

    assert!(output.status.success());
    let converted = test.read_file("output/valueset_converted.xml")?;
    assert!(
        converted.contains("xmlns=\"http://soap.sforce.com/2006/04/metadata\""),
        "{converted}"
    );
    assert!(!converted.contains("ns0"), "{converted}");
    assert!(converted.contains("<fullName>Rouge</fullName>"), "{converted}");
    Ok(())
}

#[test]
fn honors_a_custom_output_directory() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("valueset.xml", VALUESET_XML)?;
    test.write_file("mapping.csv", "original,replacement\nRed,Rouge\n")?;

    let output = test
        .relabel_command("valueset.xml", "mapping.csv")
        .arg("--out")
        .arg("converted")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("valueset_converted.xml"), "{stdout}");
    assert!(test.root().join("converted/valueset_converted.xml").exists());
    assert!(!test.root().join("output").exists());
    Ok(())
}
