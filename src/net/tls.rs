//! TLS configuration and certificate loading.

use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;

/// Problems with the certificate/key material.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("no certificate found in PEM data")]
    NoCertificate,

    #[error("no private key found in PEM data")]
    NoPrivateKey,

    #[error("malformed PEM data: {0}")]
    Pem(#[from] std::io::Error),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read certificate and key files into raw PEM bytes.
pub fn read_pem_files(cert_path: &Path, key_path: &Path) -> Result<(Vec<u8>, Vec<u8>), TlsError> {
    Ok((read_pem(cert_path)?, read_pem(key_path)?))
}

fn read_pem(path: &Path) -> Result<Vec<u8>, TlsError> {
    std::fs::read(path).map_err(|source| TlsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Check that the PEM data holds at least one certificate and a private key.
pub fn validate_pem(cert: &[u8], key: &[u8]) -> Result<(), TlsError> {
    let mut reader = cert;
    let certs = rustls_pemfile::certs(&mut reader).collect::<Result<Vec<_>, _>>()?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificate);
    }

    let mut reader = key;
    if rustls_pemfile::private_key(&mut reader)?.is_none() {
        return Err(TlsError::NoPrivateKey);
    }
    Ok(())
}

/// Build the rustls server configuration from raw PEM bytes.
pub async fn rustls_config(cert: Vec<u8>, key: Vec<u8>) -> Result<RustlsConfig, std::io::Error> {
    RustlsConfig::from_pem(cert, key).await
}
