use crate::blockhash::Blockhash;
use crate::error::TypesError;
use crate::pubkey::Pubkey;
use crate::signature::Signature;

/// The system program id (the all-zero public key). Owner of plain
/// accounts and executor of native transfers.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::ZERO;

/// Instruction tag for a system-program transfer.
const TRANSFER_TAG: u32 = 2;

/// Account referenced by an instruction, with its access flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    pub fn writable(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    pub fn readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// A single program invocation before message compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// Build a system-program transfer instruction moving `lamports` from
/// `from` to `to`.
///
/// # Wire layout of `data`
/// u32 LE instruction tag (2 = Transfer) followed by u64 LE lamports.
pub fn transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&TRANSFER_TAG.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());
    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*from, true),
            AccountMeta::writable(*to, false),
        ],
        data,
    }
}

/// Message header: how the leading entries of `account_keys` are
/// interpreted by the runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MessageHeader {
    /// Signatures required for this message to be valid
    pub num_required_signatures: u8,
    /// Trailing portion of the signing keys that is read-only
    pub num_readonly_signed_accounts: u8,
    /// Trailing portion of the non-signing keys that is read-only
    pub num_readonly_unsigned_accounts: u8,
}

/// Instruction after compilation: account references are indices into
/// the message's deduplicated key list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// Unsigned transaction message in the ledger's legacy wire format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Blockhash,
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Compile instructions into a message with `payer` as the fee payer
    /// (always the first account key).
    pub fn new(
        instructions: &[Instruction],
        payer: &Pubkey,
        recent_blockhash: Blockhash,
    ) -> Result<Self, TypesError> {
        let metas = merge_account_metas(instructions, payer);
        if metas.len() > u8::MAX as usize {
            return Err(TypesError::TooManyAccounts(metas.len()));
        }

        let num_required_signatures =
            metas.iter().filter(|m| m.is_signer).count() as u8;
        let num_readonly_signed_accounts = metas
            .iter()
            .filter(|m| m.is_signer && !m.is_writable)
            .count() as u8;
        let num_readonly_unsigned_accounts = metas
            .iter()
            .filter(|m| !m.is_signer && !m.is_writable)
            .count() as u8;

        let account_keys: Vec<Pubkey> = metas.iter().map(|m| m.pubkey).collect();

        let compiled = instructions
            .iter()
            .map(|ix| compile_instruction(ix, &account_keys))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            header: MessageHeader {
                num_required_signatures,
                num_readonly_signed_accounts,
                num_readonly_unsigned_accounts,
            },
            account_keys,
            recent_blockhash,
            instructions: compiled,
        })
    }

    /// Convenience: the message for a single system-program transfer.
    pub fn transfer(
        from: &Pubkey,
        to: &Pubkey,
        lamports: u64,
        recent_blockhash: Blockhash,
    ) -> Result<Self, TypesError> {
        Self::new(&[transfer(from, to, lamports)], from, recent_blockhash)
    }

    /// Serialize to the wire bytes that get signed.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            3 + 2 + self.account_keys.len() * Pubkey::LEN + Blockhash::LEN + 32,
        );
        out.push(self.header.num_required_signatures);
        out.push(self.header.num_readonly_signed_accounts);
        out.push(self.header.num_readonly_unsigned_accounts);
        encode_shortvec_len(self.account_keys.len(), &mut out);
        for key in &self.account_keys {
            out.extend_from_slice(key.as_bytes());
        }
        out.extend_from_slice(self.recent_blockhash.as_bytes());
        encode_shortvec_len(self.instructions.len(), &mut out);
        for ix in &self.instructions {
            out.push(ix.program_id_index);
            encode_shortvec_len(ix.accounts.len(), &mut out);
            out.extend_from_slice(&ix.accounts);
            encode_shortvec_len(ix.data.len(), &mut out);
            out.extend_from_slice(&ix.data);
        }
        out
    }
}

/// Message with signatures attached, ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub signatures: Vec<Signature>,
    pub message: Message,
}

impl Transaction {
    pub fn new(message: Message, signatures: Vec<Signature>) -> Self {
        Self {
            signatures,
            message,
        }
    }

    /// Serialize to submission wire bytes: shortvec signature count,
    /// raw signatures, then the message bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let message_bytes = self.message.serialize();
        let mut out =
            Vec::with_capacity(1 + self.signatures.len() * Signature::LEN + message_bytes.len());
        encode_shortvec_len(self.signatures.len(), &mut out);
        for sig in &self.signatures {
            out.extend_from_slice(sig.as_bytes());
        }
        out.extend_from_slice(&message_bytes);
        out
    }
}

/// Collect and deduplicate account metas: fee payer first, then
/// writable signers, read-only signers, writable non-signers, read-only
/// non-signers. Duplicate keys merge by OR-ing their access flags.
fn merge_account_metas(instructions: &[Instruction], payer: &Pubkey) -> Vec<AccountMeta> {
    let mut metas: Vec<AccountMeta> = vec![AccountMeta::writable(*payer, true)];

    for ix in instructions {
        for meta in &ix.accounts {
            merge_into(&mut metas, *meta);
        }
    }
    for ix in instructions {
        merge_into(&mut metas, AccountMeta::readonly(ix.program_id, false));
    }

    // Stable sort keeps the payer at index 0 within the first bucket.
    metas.sort_by_key(|m| (!m.is_signer, !m.is_writable));
    metas
}

fn merge_into(metas: &mut Vec<AccountMeta>, meta: AccountMeta) {
    if let Some(existing) = metas.iter_mut().find(|m| m.pubkey == meta.pubkey) {
        existing.is_signer |= meta.is_signer;
        existing.is_writable |= meta.is_writable;
    } else {
        metas.push(meta);
    }
}

fn compile_instruction(
    ix: &Instruction,
    account_keys: &[Pubkey],
) -> Result<CompiledInstruction, TypesError> {
    let index_of = |key: &Pubkey| -> Result<u8, TypesError> {
        account_keys
            .iter()
            .position(|k| k == key)
            .map(|i| i as u8)
            .ok_or(TypesError::MissingAccount)
    };

    Ok(CompiledInstruction {
        program_id_index: index_of(&ix.program_id)?,
        accounts: ix
            .accounts
            .iter()
            .map(|m| index_of(&m.pubkey))
            .collect::<Result<Vec<_>, _>>()?,
        data: ix.data.clone(),
    })
}

/// Shortvec (compact-u16) length prefix: little-endian base-128 with a
/// continuation bit, at most three bytes.
fn encode_shortvec_len(mut len: usize, out: &mut Vec<u8>) {
    loop {
        let mut byte = (len & 0x7f) as u8;
        len >>= 7;
        if len != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if len == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortvec(len: usize) -> Vec<u8> {
        let mut out = Vec::new();
        encode_shortvec_len(len, &mut out);
        out
    }

    #[test]
    fn test_shortvec_encoding_vectors() {
        assert_eq!(shortvec(0x0), vec![0x00]);
        assert_eq!(shortvec(0x7f), vec![0x7f]);
        assert_eq!(shortvec(0x80), vec![0x80, 0x01]);
        assert_eq!(shortvec(0xff), vec![0xff, 0x01]);
        assert_eq!(shortvec(0x100), vec![0x80, 0x02]);
        assert_eq!(shortvec(0x4000), vec![0x80, 0x80, 0x01]);
        assert_eq!(shortvec(0x7fff), vec![0xff, 0xff, 0x01]);
    }

    #[test]
    fn test_transfer_instruction_data_layout() {
        let from = Pubkey::from_bytes([1u8; 32]);
        let to = Pubkey::from_bytes([2u8; 32]);
        let ix = transfer(&from, &to, 42);

        assert_eq!(ix.program_id, SYSTEM_PROGRAM_ID);
        assert_eq!(&ix.data[..4], &[2, 0, 0, 0]);
        assert_eq!(&ix.data[4..], &42u64.to_le_bytes());
        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable);
    }

    #[test]
    fn test_transfer_message_compilation() {
        let from = Pubkey::from_bytes([1u8; 32]);
        let to = Pubkey::from_bytes([2u8; 32]);
        let blockhash = Blockhash::from_bytes([3u8; 32]);

        let msg = Message::transfer(&from, &to, 1_000, blockhash).unwrap();

        // payer, recipient, system program
        assert_eq!(msg.account_keys, vec![from, to, SYSTEM_PROGRAM_ID]);
        assert_eq!(msg.header.num_required_signatures, 1);
        assert_eq!(msg.header.num_readonly_signed_accounts, 0);
        assert_eq!(msg.header.num_readonly_unsigned_accounts, 1);

        assert_eq!(msg.instructions.len(), 1);
        let ix = &msg.instructions[0];
        assert_eq!(ix.program_id_index, 2);
        assert_eq!(ix.accounts, vec![0, 1]);
    }

    #[test]
    fn test_self_transfer_deduplicates() {
        let from = Pubkey::from_bytes([1u8; 32]);
        let blockhash = Blockhash::from_bytes([3u8; 32]);

        let msg = Message::transfer(&from, &from, 1, blockhash).unwrap();

        assert_eq!(msg.account_keys, vec![from, SYSTEM_PROGRAM_ID]);
        assert_eq!(msg.instructions[0].program_id_index, 1);
        assert_eq!(msg.instructions[0].accounts, vec![0, 0]);
    }

    #[test]
    fn test_message_serialization_layout() {
        let from = Pubkey::from_bytes([1u8; 32]);
        let to = Pubkey::from_bytes([2u8; 32]);
        let blockhash = Blockhash::from_bytes([3u8; 32]);

        let bytes = Message::transfer(&from, &to, 42, blockhash)
            .unwrap()
            .serialize();

        // header
        assert_eq!(&bytes[..3], &[1, 0, 1]);
        // account key count + 3 keys
        assert_eq!(bytes[3], 3);
        assert_eq!(&bytes[4..36], from.as_bytes());
        assert_eq!(&bytes[36..68], to.as_bytes());
        assert_eq!(&bytes[68..100], SYSTEM_PROGRAM_ID.as_bytes());
        // recent blockhash
        assert_eq!(&bytes[100..132], blockhash.as_bytes());
        // one instruction: program index 2, accounts [0, 1], 12 data bytes
        assert_eq!(bytes[132], 1);
        assert_eq!(bytes[133], 2);
        assert_eq!(bytes[134], 2);
        assert_eq!(&bytes[135..137], &[0, 1]);
        assert_eq!(bytes[137], 12);
        assert_eq!(&bytes[138..142], &[2, 0, 0, 0]);
        assert_eq!(&bytes[142..150], &42u64.to_le_bytes());
        assert_eq!(bytes.len(), 150);
    }

    #[test]
    fn test_transaction_serialization_prepends_signatures() {
        let from = Pubkey::from_bytes([1u8; 32]);
        let to = Pubkey::from_bytes([2u8; 32]);
        let blockhash = Blockhash::from_bytes([3u8; 32]);

        let message = Message::transfer(&from, &to, 42, blockhash).unwrap();
        let message_bytes = message.serialize();
        let sig = Signature::from_bytes([7u8; 64]);
        let tx = Transaction::new(message, vec![sig]);

        let bytes = tx.serialize();
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..65], sig.as_bytes());
        assert_eq!(&bytes[65..], &message_bytes[..]);
    }
}
