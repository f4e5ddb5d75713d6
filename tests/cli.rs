use std::path::{Path, PathBuf};

use assert_cmd::Command;
use docx_rs::{Docx, Paragraph, Run};
use predicates::prelude::*;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> anyhow::Result<Self> {
        let fixture = Self {
            dir: tempfile::tempdir()?,
        };
        fixture.write_statement()?;
        fixture.write_keywords(true)?;
        fixture.write_template()?;
        Ok(fixture)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_statement(&self) -> anyhow::Result<()> {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        for (col, title) in ["Date", "BRN", "Description", "Chq No", "Debit", "Credit"]
            .iter()
            .enumerate()
        {
            ws.write_string(0, col as u16, *title)?;
        }
        // Frame row N sits on sheet row N + 1.
        ws.write_string(2, 0, "Gulshan Branch")?;
        ws.write_string(7, 0, "Rahima Khatun")?;
        ws.write_string(7, 1, "1234567890")?;
        ws.write_string(8, 1, "01-Jan-2025 to 31-Mar-2025")?;

        let rows: [(&str, f64, &str, f64); 5] = [
            ("2025-01-05", 747.0, "Inward Remit via EFT", 1000.0),
            ("2025-01-06", 747.0, "EFT incentive", 25.0),
            ("2025-01-07", 100.0, "NPSB transfer", 2000.0),
            ("2025-01-08", 100.0, "Western Union Remit", 500.0),
            ("2025-01-09", 100.0, "Remit REVERSAL", 800.0),
        ];
        let date_format = Format::new().set_num_format("dd/mm/yyyy");
        for (i, (date, branch, desc, credit)) in rows.iter().enumerate() {
            let r = 9 + i as u32;
            // First row carries a native Excel date, the rest are text.
            if i == 0 {
                let native = ExcelDateTime::parse_from_str(date)?;
                ws.write_datetime_with_format(r, 0, &native, &date_format)?;
            } else {
                ws.write_string(r, 0, *date)?;
            }
            ws.write_number(r, 1, *branch)?;
            ws.write_string(r, 2, *desc)?;
            ws.write_number(r, 5, *credit)?;
        }
        workbook.save(self.path("statement.xlsx"))?;
        Ok(())
    }

    fn write_keywords(&self, with_incentive_sheet: bool) -> anyhow::Result<()> {
        let mut sheets: Vec<(&str, Vec<&str>)> = vec![("Principal", vec!["REMIT", "Western Union"])];
        if with_incentive_sheet {
            sheets.push(("Incentive", vec!["Incentive"]));
        }
        sheets.push(("Exclusion", vec!["REVERSAL"]));

        let mut workbook = Workbook::new();
        for (name, words) in sheets {
            let ws = workbook.add_worksheet();
            ws.set_name(name)?;
            ws.write_string(0, 0, "Keyword")?;
            for (i, w) in words.iter().enumerate() {
                ws.write_string(i as u32 + 1, 0, *w)?;
            }
        }
        workbook.save(self.path("keywords.xlsx"))?;
        Ok(())
    }

    fn write_template(&self) -> anyhow::Result<()> {
        let para = |text: &str| Paragraph::new().add_run(Run::new().add_text(text));
        let file = std::fs::File::create(self.path("Template.docx"))?;
        Docx::new()
            .add_paragraph(para("Ref: REM/2025/001"))
            .add_paragraph(para("This is to certify that Mr."))
            .add_paragraph(para("A/C No- maintained with Example Bank PLC,"))
            .add_paragraph(para("Table-A:  Remittance Details:"))
            .build()
            .pack(file)?;
        Ok(())
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("remitcert").unwrap();
        cmd.env("HOME", self.dir.path())
            .env("NO_COLOR", "1")
            .current_dir(self.dir.path());
        cmd
    }
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn preview_prints_matched_lines_and_words() {
    let fx = Fixture::new().unwrap();
    fx.cmd()
        .args(["preview", &arg(&fx.path("statement.xlsx"))])
        .args(["--keywords", &arg(&fx.path("keywords.xlsx"))])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rahima Khatun"))
        .stdout(predicate::str::contains("EFT Credited by Other Bank"))
        .stdout(predicate::str::contains("January 05, 2025"))
        .stdout(predicate::str::contains("Western Union Remit"))
        .stdout(predicate::str::contains("1,525.00"))
        .stdout(predicate::str::contains(
            "In Words: Taka One Thousand Five Hundred and Twenty Five Only",
        ))
        .stdout(predicate::str::contains("NPSB transfer").not())
        .stdout(predicate::str::contains("REVERSAL").not());
}

#[test]
fn generate_writes_certificate() {
    let fx = Fixture::new().unwrap();
    let out_dir = fx.path("certs");
    fx.cmd()
        .args(["generate", &arg(&fx.path("statement.xlsx"))])
        .args(["--keywords", &arg(&fx.path("keywords.xlsx"))])
        .args(["--template", &arg(&fx.path("Template.docx"))])
        .args(["--output-dir", &arg(&out_dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Certificate saved to"))
        .stdout(predicate::str::contains("2 remittance line(s), total 1,525.00"));

    let saved = out_dir.join("Remittance_Certificate_Rahima_Khatun.docx");
    let bytes = std::fs::read(&saved).unwrap();
    assert!(docx_rs::read_docx(&bytes).is_ok());
}

#[test]
fn generate_uses_default_relative_paths() {
    let fx = Fixture::new().unwrap();
    std::fs::create_dir_all(fx.path("data")).unwrap();
    std::fs::create_dir_all(fx.path("template")).unwrap();
    std::fs::rename(
        fx.path("keywords.xlsx"),
        fx.path("data/Remittance Certificate Key Words.xlsx"),
    )
    .unwrap();
    std::fs::rename(fx.path("Template.docx"), fx.path("template/Template.docx")).unwrap();

    fx.cmd()
        .args(["generate", "statement.xlsx"])
        .assert()
        .success();
    assert!(fx
        .path("output/Remittance_Certificate_Rahima_Khatun.docx")
        .exists());
}

#[test]
fn missing_template_fails_without_output() {
    let fx = Fixture::new().unwrap();
    let out_dir = fx.path("certs");
    fx.cmd()
        .args(["generate", &arg(&fx.path("statement.xlsx"))])
        .args(["--keywords", &arg(&fx.path("keywords.xlsx"))])
        .args(["--template", &arg(&fx.path("absent.docx"))])
        .args(["--output-dir", &arg(&out_dir)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("absent.docx"));
    assert!(!out_dir.exists());
}

#[test]
fn missing_keyword_sheet_fails() {
    let fx = Fixture::new().unwrap();
    fx.write_keywords(false).unwrap();
    fx.cmd()
        .args(["preview", &arg(&fx.path("statement.xlsx"))])
        .args(["--keywords", &arg(&fx.path("keywords.xlsx"))])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing sheet 'Incentive'"));
}

#[test]
fn config_set_then_show() {
    let fx = Fixture::new().unwrap();
    fx.cmd()
        .args(["config", "set", "--output-dir", "/srv/certificates"])
        .assert()
        .success();
    fx.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output-dir: /srv/certificates"))
        .stdout(predicate::str::contains("template:   template/Template.docx"));
}
