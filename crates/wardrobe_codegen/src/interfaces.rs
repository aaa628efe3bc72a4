//! # Target Contract Interfaces
//!
//! ABI of the V5 contracts the generated migration calls, defined once with
//! alloy's `sol!` macro. The emitter takes function names and selectors from
//! here, and the generated source declares the same interfaces.

// The sol! macro generates code that we can't document, so allow missing_docs
#![allow(missing_docs)]

use alloy_primitives::hex;
use alloy_sol_types::{sol, SolCall};

sol! {
    /// V5 721 hook: mints tokens from tiers for a beneficiary.
    interface IJB721TiersHook {
        function mintFor(uint16[] calldata tierIds, address beneficiary)
            external
            returns (uint256[] memory tokenIds);
    }

    /// Resolver that attaches a background and outfits to a body.
    interface IBannyResolver {
        function decorateBannyWith(
            address hook,
            uint256 bannyBodyId,
            uint256 backgroundId,
            uint256[] calldata outfitIds
        ) external;
    }

    /// Subset of ERC-721 used for approvals and hand-outs.
    interface IERC721 {
        function setApprovalForAll(address operator, bool approved) external;
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
    }

    /// Callback the staging contract implements to accept safe transfers.
    interface IERC721Receiver {
        function onERC721Received(address operator, address from, uint256 tokenId, bytes calldata data)
            external
            returns (bytes4);
    }
}

/// A function the generated migration calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalledFunction {
    /// Solidity interface declaring the function.
    pub interface: &'static str,
    /// Canonical signature, e.g. `mintFor(uint16[],address)`.
    pub signature: &'static str,
    /// 4-byte selector.
    pub selector: [u8; 4],
}

impl CalledFunction {
    const fn of<C: SolCall>(interface: &'static str) -> Self {
        Self {
            interface,
            signature: C::SIGNATURE,
            selector: C::SELECTOR,
        }
    }

    /// Function name without the argument list.
    #[must_use]
    pub fn name(&self) -> &'static str {
        let signature = self.signature;
        signature.split_once('(').map_or(signature, |(name, _)| name)
    }

    /// Selector as `0x`-prefixed hex.
    #[must_use]
    pub fn selector_hex(&self) -> String {
        hex::encode_prefixed(self.selector)
    }
}

/// Hook mint call.
pub const MINT_FOR: CalledFunction =
    CalledFunction::of::<IJB721TiersHook::mintForCall>("IJB721TiersHook");

/// Resolver dressing call.
pub const DECORATE_BANNY_WITH: CalledFunction =
    CalledFunction::of::<IBannyResolver::decorateBannyWithCall>("IBannyResolver");

/// Approval of the resolver over staged tokens.
pub const SET_APPROVAL_FOR_ALL: CalledFunction =
    CalledFunction::of::<IERC721::setApprovalForAllCall>("IERC721");

/// Hand-out to the final owner.
pub const SAFE_TRANSFER_FROM: CalledFunction =
    CalledFunction::of::<IERC721::safeTransferFromCall>("IERC721");

/// Receiver callback implemented by the generated contract.
pub const ON_ERC721_RECEIVED: CalledFunction =
    CalledFunction::of::<IERC721Receiver::onERC721ReceivedCall>("IERC721Receiver");

/// Every function the generated code may call, in header order.
pub const CALLED_FUNCTIONS: [CalledFunction; 4] = [
    MINT_FOR,
    SET_APPROVAL_FOR_ALL,
    DECORATE_BANNY_WITH,
    SAFE_TRANSFER_FROM,
];

/// Solidity declarations matching the `sol!` block above.
pub const INTERFACE_SOURCE: &str = "\
interface IJB721TiersHook {
    function mintFor(uint16[] calldata tierIds, address beneficiary) external returns (uint256[] memory tokenIds);
}

interface IBannyResolver {
    function decorateBannyWith(address hook, uint256 bannyBodyId, uint256 backgroundId, uint256[] calldata outfitIds) external;
}

interface IERC721 {
    function setApprovalForAll(address operator, bool approved) external;
    function safeTransferFrom(address from, address to, uint256 tokenId) external;
}
";
