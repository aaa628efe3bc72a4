//! # Solidity Emitter
//!
//! Renders migration plans into a deployable migration contract.
//!
//! ## Generated Shape
//!
//! ```text
//! execute()                      deployer only, runs once
//!   └─ block.chainid dispatch    one branch per chain of the table
//!        └─ _migrate<Chain>()    mint ─▶ dress ─▶ hand out
//!   └─ else                      revert UnsupportedChain
//! ```
//!
//! Every chain is rendered by the same function; chain differences (ids,
//! addresses, plans) are data.

use wardrobe_core::{ChainPlan, Item, MigrationPlan, Reference, ResolvedBody};
use wardrobe_shared::{ChainInfo, SUPPORTED_CHAINS};

use crate::config::{ChainAddresses, GeneratorConfig};
use crate::error::{CodegenError, CodegenResult};
use crate::interfaces::{CALLED_FUNCTIONS, INTERFACE_SOURCE, ON_ERC721_RECEIVED};
use crate::writer::SolidityWriter;

/// How generated code is split into files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One contract dispatching on `block.chainid`.
    #[default]
    Unified,
    /// One contract per chain of the table.
    PerChain,
}

/// A rendered Solidity source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Suggested file name (`<Contract>.sol`).
    pub file_name: String,
    /// Name of the contract inside.
    pub contract_name: String,
    /// Target chain in per-chain mode.
    pub chain: Option<ChainInfo>,
    /// Source text.
    pub source: String,
}

/// One dispatch branch, with everything validated up front.
struct Branch<'p> {
    chain: ChainInfo,
    work: Option<(&'p ChainPlan, ChainAddresses)>,
}

impl Branch<'_> {
    fn function_name(&self) -> String {
        format!("_migrate{}", self.chain.name)
    }
}

/// Renders plans according to a configuration.
#[derive(Clone, Copy, Debug)]
pub struct Emitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Emitter<'a> {
    /// Creates an emitter.
    #[must_use]
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Renders `plan` into one or more files.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::UnsupportedChain`] if the plan carries items for
    /// a chain outside the table, and [`CodegenError::MissingAddress`] if a
    /// chain with items lacks a hook or resolver address.
    pub fn emit(&self, plan: &MigrationPlan, mode: OutputMode) -> CodegenResult<Vec<GeneratedFile>> {
        if let Some(&chain_id) = plan.unsupported_chains().first() {
            return Err(CodegenError::UnsupportedChain(chain_id));
        }

        let branches = SUPPORTED_CHAINS
            .iter()
            .map(|&chain| self.branch(plan, chain))
            .collect::<CodegenResult<Vec<_>>>()?;

        let files = match mode {
            OutputMode::Unified => {
                vec![self.render_file(self.config.contract_name.clone(), None, &branches)]
            }
            OutputMode::PerChain => branches
                .iter()
                .map(|branch| {
                    let name = format!("{}{}", self.config.contract_name, branch.chain.name);
                    self.render_file(name, Some(branch.chain), std::slice::from_ref(branch))
                })
                .collect(),
        };

        for file in &files {
            tracing::info!(
                file = %file.file_name,
                bytes = file.source.len(),
                "rendered migration contract"
            );
        }
        Ok(files)
    }

    fn branch<'p>(&self, plan: &'p MigrationPlan, chain: ChainInfo) -> CodegenResult<Branch<'p>> {
        let work = match plan.chain(chain.id) {
            Some(chain_plan) if !chain_plan.is_empty() => {
                Some((chain_plan, self.config.addresses(chain.id)?))
            }
            _ => {
                tracing::debug!(chain_id = chain.id, "no tokens, emitting no-op branch");
                None
            }
        };
        Ok(Branch { chain, work })
    }

    fn render_file(&self, contract_name: String, chain: Option<ChainInfo>, branches: &[Branch<'_>]) -> GeneratedFile {
        let mut w = SolidityWriter::new();
        self.write_header(&mut w);
        write_contract(&mut w, &contract_name, branches);

        GeneratedFile {
            file_name: format!("{contract_name}.sol"),
            contract_name,
            chain,
            source: w.finish(),
        }
    }

    fn write_header(&self, w: &mut SolidityWriter) {
        w.line(format!("// SPDX-License-Identifier: {}", self.config.license));
        w.line(format!("pragma solidity {};", self.config.solidity_version));
        w.blank();
        w.line("// Generated by wardrobe from a V4 export. Do not edit by hand.");
        w.line("//");
        w.line("// Calls:");
        for function in CALLED_FUNCTIONS {
            w.line(format!(
                "//   {}.{} {}",
                function.interface,
                function.signature,
                function.selector_hex()
            ));
        }
        w.blank();
        w.block(INTERFACE_SOURCE);
        w.blank();
    }
}

fn write_contract(w: &mut SolidityWriter, name: &str, branches: &[Branch<'_>]) {
    w.open(format!("contract {name} {{"));
    w.line("address private immutable OPERATOR;");
    w.line("bool private executed;");
    w.blank();
    w.line("error AlreadyExecuted();");
    w.line("error Unauthorized();");
    w.line("error UnsupportedChain(uint256 chainId);");
    w.blank();
    w.open("constructor() {");
    w.line("OPERATOR = msg.sender;");
    w.close("}");
    w.blank();

    w.open("function execute() external {");
    w.line("if (msg.sender != OPERATOR) revert Unauthorized();");
    w.line("if (executed) revert AlreadyExecuted();");
    w.line("executed = true;");
    w.blank();
    write_dispatch(w, branches);
    w.close("}");
    w.blank();

    w.open("function onERC721Received(address, address, uint256, bytes calldata) external pure returns (bytes4) {");
    w.line(format!("return {};", ON_ERC721_RECEIVED.selector_hex()));
    w.close("}");

    for branch in branches {
        if let Some((plan, addresses)) = branch.work {
            w.blank();
            write_chain_function(w, &branch.function_name(), branch.chain, plan, addresses);
        }
    }
    w.close("}");
}

fn write_dispatch(w: &mut SolidityWriter, branches: &[Branch<'_>]) {
    for (i, branch) in branches.iter().enumerate() {
        let condition = format!("if (block.chainid == {}) {{", branch.chain.id);
        if i == 0 {
            w.open(condition);
        } else {
            w.reopen(format!("}} else {condition}"));
        }
        match branch.work {
            Some(_) => w.line(format!("{}();", branch.function_name())),
            None => w.line(format!("// Nothing to migrate on {}.", branch.chain.name)),
        }
    }
    if branches.is_empty() {
        w.line("revert UnsupportedChain(block.chainid);");
    } else {
        w.reopen("} else {");
        w.line("revert UnsupportedChain(block.chainid);");
        w.close("}");
    }
}

fn write_chain_function(
    w: &mut SolidityWriter,
    function_name: &str,
    chain: ChainInfo,
    plan: &ChainPlan,
    addresses: ChainAddresses,
) {
    let issued = plan.remap.issued();

    w.open(format!("function {function_name}() private {{"));
    w.line(format!("// {} (chain {})", chain.name, chain.id));
    w.line(format!("address hook = {};", addresses.hook));
    w.line(format!("address resolver = {};", addresses.resolver));
    w.blank();

    w.line(format!(
        "// Mint {} {} across {} catalog {}.",
        issued.len(),
        plural(issued.len(), "token", "tokens"),
        plan.tally.len(),
        plural(plan.tally.len(), "code", "codes"),
    ));
    w.line(format!("uint16[] memory upcs = new uint16[]({});", issued.len()));
    for (position, code) in issued.iter().enumerate() {
        w.line(format!("upcs[{position}] = {code};"));
    }
    w.line("uint256[] memory tokenIds = IJB721TiersHook(hook).mintFor(upcs, address(this));");

    if !plan.bodies.is_empty() {
        w.blank();
        w.line(format!(
            "// Dress {} {}.",
            plan.bodies.len(),
            plural(plan.bodies.len(), "body", "bodies")
        ));
        w.line("IERC721(hook).setApprovalForAll(resolver, true);");
        w.line("uint256[] memory outfits;");
        for body in &plan.bodies {
            write_decoration(w, body);
        }
    }

    let transfers = plan.transfers.transfers();
    if !transfers.is_empty() {
        w.blank();
        w.line(format!(
            "// Hand out {} {}.",
            transfers.len(),
            plural(transfers.len(), "token", "tokens")
        ));
        for transfer in transfers {
            w.line(format!(
                "IERC721(hook).safeTransferFrom(address(this), {}, tokenIds[{}]);",
                transfer.owner, transfer.position
            ));
        }
    }

    w.close("}");
}

fn write_decoration(w: &mut SolidityWriter, body: &ResolvedBody) {
    w.line(format!("// Body {}", body.old_id));
    w.line(format!("outfits = new uint256[]({});", body.worn.len()));
    for (i, reference) in body.worn.iter().enumerate() {
        w.line(format!("outfits[{i}] = {};{}", render_reference(*reference), unresolved_note(*reference)));
    }

    w.line(format!(
        "IBannyResolver(resolver).decorateBannyWith(hook, tokenIds[{}], {}, outfits);{}",
        body.position,
        render_reference(body.background),
        unresolved_note(body.background)
    ));
}

/// Solidity expression for a resolved reference.
#[must_use]
pub fn render_reference(reference: Reference) -> String {
    match reference {
        Reference::Issued(position) => format!("tokenIds[{position}]"),
        Reference::Unresolved(old_id) => old_id.to_string(),
        Reference::Empty => "0".to_string(),
    }
}

fn unresolved_note(reference: Reference) -> &'static str {
    match reference {
        Reference::Unresolved(_) => " // unresolved V4 id",
        Reference::Issued(_) | Reference::Empty => "",
    }
}

const fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Plans `items` with the config's reference policy and renders the result.
///
/// # Errors
///
/// Returns planning errors (strict mode) and emission errors, see
/// [`Emitter::emit`].
pub fn generate<I>(items: I, config: &GeneratorConfig, mode: OutputMode) -> CodegenResult<Vec<GeneratedFile>>
where
    I: IntoIterator<Item = Item>,
{
    let plan = MigrationPlan::build(items, &SUPPORTED_CHAINS, config.reference_policy())?;
    Emitter::new(config).emit(&plan, mode)
}
