use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Digest, Sha256};

// Provably-fair draws: server_seed (secret) + client_seed + nonce -> HMAC-SHA256,
// then the digest is chained through SHA-256 for as many words as a round needs.

pub type HmacSha256 = Hmac<Sha256>;

pub fn derive_hash_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

#[derive(Debug, Clone)]
pub struct ProvablyFairRng {
    pub server_seed: String, // secret
    pub client_seed: String,
    pub nonce: u64,
}

impl ProvablyFairRng {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
        }
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    pub fn hmac_bytes(&self) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.server_seed.as_bytes())
            .expect("HMAC takes keys of any length");
        let msg = format!("{}:{}", self.client_seed, self.nonce);
        mac.update(msg.as_bytes());
        let res = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&res);
        out
    }

    /// A fresh word stream for this round. Two streams from equal seeds are identical.
    pub fn stream(&self) -> FairStream {
        FairStream {
            block: self.hmac_bytes(),
            pos: 0,
        }
    }
}

/// Deterministic `RngCore` over the round's HMAC block.
///
/// Words are read as big-endian `u32`s; once a block is used up the next one
/// is the SHA-256 of the previous block.
#[derive(Debug, Clone)]
pub struct FairStream {
    block: [u8; 32],
    pos: usize,
}

impl RngCore for FairStream {
    fn next_u32(&mut self) -> u32 {
        if self.pos + 4 > self.block.len() {
            let next = Sha256::digest(self.block);
            self.block.copy_from_slice(&next);
            self.pos = 0;
        }
        let chunk = &self.block[self.pos..self.pos + 4];
        self.pos += 4;
        u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.next_u32().to_be_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
