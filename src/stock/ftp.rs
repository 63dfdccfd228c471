use super::{StockError, StockSource};
use crate::config::FtpConfig;
use suppaftp::types::FileType;
use suppaftp::FtpStream;
use tracing::info;

const DEFAULT_FTP_PORT: u16 = 21;

/// Reads stock files from the warehouse FTP server, one session per file
pub struct FtpStockSource {
    config: FtpConfig,
}

impl FtpStockSource {
    pub fn new(config: FtpConfig) -> Self {
        Self { config }
    }

    fn address(&self) -> String {
        if self.config.host.contains(':') {
            self.config.host.clone()
        } else {
            format!("{}:{}", self.config.host, DEFAULT_FTP_PORT)
        }
    }
}

impl StockSource for FtpStockSource {
    fn fetch(&mut self, file_name: &str) -> Result<Vec<u8>, StockError> {
        let mut ftp = FtpStream::connect(self.address())?;
        ftp.login(&self.config.user, &self.config.password)?;
        ftp.transfer_type(FileType::Binary)?;

        info!("Fetching stock file '{}' over FTP", file_name);

        let buffer = ftp.retr_as_buffer(file_name)?;
        ftp.quit()?;
        Ok(buffer.into_inner())
    }
}
