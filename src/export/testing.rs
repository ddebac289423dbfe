//! Recording export backends shared by the unit tests.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use super::{
    dependencies::{ExportClipboard, ExportDependencies, ExportFileSaver},
    file::FileSaveConfig,
    types::ExportError,
};

#[derive(Clone, Default)]
pub(crate) struct MockSaver {
    pub should_fail: bool,
    pub saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl ExportFileSaver for MockSaver {
    fn save(
        &self,
        image_data: &[u8],
        filename: &str,
        config: &FileSaveConfig,
    ) -> Result<PathBuf, ExportError> {
        if self.should_fail {
            return Err(ExportError::Save(std::io::Error::other("save failed")));
        }
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), image_data.to_vec()));
        Ok(Path::new(&config.save_directory).join(filename))
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockClipboard {
    pub should_fail: bool,
    pub copied: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl ExportClipboard for MockClipboard {
    fn copy(&self, image_data: &[u8]) -> Result<(), ExportError> {
        if self.should_fail {
            return Err(ExportError::PermissionDenied(
                "clipboard write rejected".to_string(),
            ));
        }
        self.copied.lock().unwrap().push(image_data.to_vec());
        Ok(())
    }
}

pub(crate) fn mock_dependencies(
    saver: &MockSaver,
    clipboard: &MockClipboard,
) -> ExportDependencies {
    ExportDependencies {
        saver: Arc::new(saver.clone()),
        clipboard: Arc::new(clipboard.clone()),
    }
}
