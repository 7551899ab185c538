//! Account and instruction data (de)serialization helpers
//!
//! All reads are bounds checked and fail with `ClientError` on short or
//! malformed input. Integers are little-endian, nullable addresses use the
//! all-zero address as `None`.

use crate::ClientError;
use solana_sdk::{hash::hash, pubkey::Pubkey};

/// Anchor account discriminator: sha256("account:<Name>")[..8]
pub fn account_discriminator(name: &str) -> [u8; 8] {
    sighash("account", name)
}

/// Anchor instruction discriminator: sha256("global:<name>")[..8]
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    sighash("global", name)
}

fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{}:{}", namespace, name);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Account data reader with tracked offset
///
/// Reads fields sequentially so decoders mirror the on-chain field order.
pub struct AccountReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> AccountReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Read a fixed-size byte array and advance offset
    #[inline]
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], ClientError> {
        let end = self.offset.checked_add(N).filter(|end| *end <= self.data.len());
        let Some(end) = end else {
            return Err(ClientError::InvalidAccountData(format!(
                "expected {} bytes at offset {}, {} remaining",
                N,
                self.offset,
                self.remaining()
            )));
        };

        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[self.offset..end]);
        self.offset = end;
        Ok(bytes)
    }

    /// Advance offset without decoding (reserved space)
    #[inline]
    pub fn skip(&mut self, len: usize) -> Result<(), ClientError> {
        if len > self.remaining() {
            return Err(ClientError::InvalidAccountData(format!(
                "cannot skip {} bytes at offset {}",
                len, self.offset
            )));
        }
        self.offset += len;
        Ok(())
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, ClientError> {
        Ok(self.read_bytes::<1>()?[0])
    }

    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, ClientError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ClientError::InvalidAccountData(format!(
                "invalid bool byte {} at offset {}",
                other,
                self.offset - 1
            ))),
        }
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, ClientError> {
        Ok(u16::from_le_bytes(self.read_bytes()?))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, ClientError> {
        Ok(u32::from_le_bytes(self.read_bytes()?))
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, ClientError> {
        Ok(i32::from_le_bytes(self.read_bytes()?))
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, ClientError> {
        Ok(u64::from_le_bytes(self.read_bytes()?))
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64, ClientError> {
        Ok(i64::from_le_bytes(self.read_bytes()?))
    }

    #[inline]
    pub fn read_pubkey(&mut self) -> Result<Pubkey, ClientError> {
        Ok(Pubkey::new_from_array(self.read_bytes()?))
    }

    /// Read an address where the default address means "not set"
    #[inline]
    pub fn read_nullable_pubkey(&mut self) -> Result<Option<Pubkey>, ClientError> {
        let key = self.read_pubkey()?;
        Ok((key != Pubkey::default()).then_some(key))
    }

    /// Check and consume an 8-byte discriminator
    pub fn expect_discriminator(&mut self, expected: &[u8; 8]) -> Result<(), ClientError> {
        let found = self.read_bytes::<8>()?;
        if &found != expected {
            return Err(ClientError::InvalidAccountData(format!(
                "discriminator mismatch: expected {:?}, found {:?}",
                expected, found
            )));
        }
        Ok(())
    }
}

/// Append-only writer, the encoding counterpart of [`AccountReader`]
#[derive(Debug, Default)]
pub struct AccountWriter {
    buf: Vec<u8>,
}

impl AccountWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_pubkey(&mut self, key: &Pubkey) {
        self.write_bytes(key.as_ref());
    }

    pub fn write_nullable_pubkey(&mut self, key: Option<&Pubkey>) {
        self.write_pubkey(key.unwrap_or(&Pubkey::default()));
    }

    /// Zero padding (reserved space)
    pub fn write_zeros(&mut self, len: usize) {
        self.buf.resize(self.buf.len() + len, 0);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
