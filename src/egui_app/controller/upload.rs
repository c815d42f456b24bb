use std::path::Path;

use rfd::FileDialog;

use super::*;
use crate::gateway::CsvUpload;

impl DashboardController {
    /// Ask the user for a CSV file and keep it for the next submission.
    pub fn pick_csv_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_title("Choose a CSV file to score")
            .pick_file()
        else {
            return;
        };
        self.load_csv(&path);
    }

    /// Read `path` into memory as the file to submit.
    pub fn load_csv(&mut self, path: &Path) {
        match CsvUpload::from_path(path) {
            Ok(file) => {
                let text = format!("Ready to upload {}", view_model::file_label(&file));
                self.submissions.set_file(file);
                self.set_status(text, StatusTone::Info);
            }
            Err(err) => {
                self.submissions.clear_file();
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
        self.refresh_upload_ui();
    }

    pub fn clear_csv(&mut self) {
        self.submissions.clear_file();
        self.refresh_upload_ui();
        self.set_status("Upload cleared", StatusTone::Idle);
    }

    /// Submit the picked file against the selected model.
    pub fn submit_csv(&mut self) {
        let selection = self.catalog.selection().cloned();
        match self.submissions.submit(selection.as_ref()) {
            Ok(()) => {
                let file_name = self
                    .submissions
                    .file()
                    .map(|file| file.file_name.clone())
                    .unwrap_or_default();
                let model = selection
                    .map(|model| model.display_name())
                    .unwrap_or_default();
                self.set_status(
                    format!("Scoring {file_name} with {model}..."),
                    StatusTone::Busy,
                );
            }
            Err(err) => self.set_status(err.to_string(), StatusTone::Warning),
        }
        self.refresh_upload_ui();
    }
}
