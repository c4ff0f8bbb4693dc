//! In-memory ledger that plays the ERC-20, Uniswap and Aave contracts the
//! pipeline talks to.

#![allow(dead_code)]

use alloy::primitives::{Address, B256, Bytes, I256, Log, U256, aliases::{I24, U160, U24}};
use alloy::sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use swap_supply_borrow::{
    BotError, BotResult, ContractAddresses, ExecutionContext, Ledger, StrategySettings,
    TokenRoute, TxReceipt,
    contracts::{
        IAaveOracle, IAavePool, IERC20, IPoolAddressesProvider, IQuoterV2, ISwapRouter02,
        IUniswapV3Factory, IUniswapV3Pool,
    },
};

pub const SIGNER: Address = Address::repeat_byte(0x5e);
pub const POOL: Address = Address::repeat_byte(0x90);
pub const ADDRESSES_PROVIDER: Address = Address::repeat_byte(0xa1);
pub const ORACLE: Address = Address::repeat_byte(0xa2);

pub fn route() -> TokenRoute {
    TokenRoute::sepolia_usdc_link_dai()
}

pub fn contracts() -> ContractAddresses {
    ContractAddresses::sepolia()
}

pub fn usdc(amount: u64) -> U256 {
    U256::from(amount) * U256::from(1_000_000u64)
}

pub fn wad(amount: u64) -> U256 {
    U256::from(amount) * U256::from(1_000_000_000_000_000_000u128)
}

#[derive(Debug, Clone)]
pub struct SentTx {
    pub to: Address,
    pub selector: [u8; 4],
}

#[derive(Debug, Default)]
pub struct MockChain {
    pub balances: HashMap<(Address, Address), U256>,
    pub allowances: HashMap<(Address, Address, Address), U256>,
    /// (tokenA, tokenB, fee) in either order → pool
    pub pools: HashMap<(Address, Address, u32), Address>,
    pub pool_tokens: HashMap<Address, (Address, Address, u32)>,
    /// Output per input base unit, as numerator / denominator
    pub swap_rate: (U256, U256),
    /// Quote returned by the quoter when set, instead of the swap rate
    pub quote_override: Option<U256>,
    pub supplied: HashMap<(Address, Address), U256>,
    pub borrowed: HashMap<(Address, Address), U256>,
    pub available_borrows_base: U256,
    pub asset_prices: HashMap<Address, U256>,
    pub revert_selectors: HashSet<[u8; 4]>,
    pub timeout_selectors: HashSet<[u8; 4]>,
    pub last_swap: Option<ISwapRouter02::ExactInputSingleParams>,
    pub sent: Vec<SentTx>,
    pub calls: usize,
    nonce: u64,
}

impl MockChain {
    pub fn balance(&self, token: Address, owner: Address) -> U256 {
        self.balances.get(&(token, owner)).copied().unwrap_or_default()
    }

    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(token, owner, spender)).copied().unwrap_or_default()
    }

    fn credit(&mut self, token: Address, owner: Address, amount: U256) {
        *self.balances.entry((token, owner)).or_default() += amount;
    }

    fn debit(&mut self, token: Address, owner: Address, amount: U256) -> bool {
        let balance = self.balances.entry((token, owner)).or_default();
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        true
    }

    fn spend_allowance(&mut self, token: Address, owner: Address, spender: Address, amount: U256) -> bool {
        let allowance = self.allowances.entry((token, owner, spender)).or_default();
        if *allowance < amount {
            return false;
        }
        *allowance -= amount;
        true
    }

    fn swap_output(&self, amount_in: U256) -> U256 {
        amount_in * self.swap_rate.0 / self.swap_rate.1
    }

    pub fn sent_selectors(&self) -> Vec<[u8; 4]> {
        self.sent.iter().map(|tx| tx.selector).collect()
    }

    pub fn sent_count(&self, selector: [u8; 4]) -> usize {
        self.sent.iter().filter(|tx| tx.selector == selector).count()
    }
}

pub struct MockLedger {
    signer: Address,
    contracts: ContractAddresses,
    pub state: Mutex<MockChain>,
}

impl MockLedger {
    /// A funded signer and a USDC/LINK pool at the 3000 fee tier where
    /// 1 USDC buys 71.234567890123 LINK.
    pub fn funded() -> Self {
        let route = route();
        let mut chain = MockChain {
            swap_rate: (U256::from(71_234_567_890_123u64), U256::from(1u64)),
            available_borrows_base: U256::from(100u64) * U256::from(100_000_000u64),
            ..Default::default()
        };
        chain.credit(route.input.address, SIGNER, usdc(10));
        chain.credit(route.collateral.address, SIGNER, wad(5));

        let (token0, token1) = if route.input.address < route.collateral.address {
            (route.input.address, route.collateral.address)
        } else {
            (route.collateral.address, route.input.address)
        };
        chain.pools.insert((token0, token1, 3000), POOL);
        chain.pools.insert((token1, token0, 3000), POOL);
        chain.pool_tokens.insert(POOL, (token0, token1, 3000));
        chain.asset_prices.insert(route.debt.address, U256::from(100_000_000u64));

        Self {
            signer: SIGNER,
            contracts: contracts(),
            state: Mutex::new(chain),
        }
    }

    pub fn with<F: FnOnce(&mut MockChain)>(self, f: F) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn into_context(self, settings: StrategySettings) -> (Arc<MockLedger>, ExecutionContext) {
        let ledger = Arc::new(self);
        let ctx = ExecutionContext::new(ledger.clone(), contracts(), route(), settings);
        (ledger, ctx)
    }

    fn next_hash(chain: &mut MockChain) -> B256 {
        chain.nonce += 1;
        B256::from(U256::from(chain.nonce))
    }

    fn read(&self, to: Address, input: &[u8]) -> Result<Vec<u8>, String> {
        let chain = self.state.lock().unwrap();
        let selector: [u8; 4] = input.get(..4).and_then(|s| s.try_into().ok()).ok_or("short input")?;

        if selector == IERC20::balanceOfCall::SELECTOR {
            let call = IERC20::balanceOfCall::abi_decode(input, true).map_err(|e| e.to_string())?;
            return Ok(IERC20::balanceOfCall::abi_encode_returns(&(chain.balance(to, call.account),)));
        }
        if selector == IERC20::allowanceCall::SELECTOR {
            let call = IERC20::allowanceCall::abi_decode(input, true).map_err(|e| e.to_string())?;
            let remaining = chain.allowance(to, call.owner, call.spender);
            return Ok(IERC20::allowanceCall::abi_encode_returns(&(remaining,)));
        }
        if selector == IUniswapV3Factory::getPoolCall::SELECTOR && to == self.contracts.factory {
            let call = IUniswapV3Factory::getPoolCall::abi_decode(input, true).map_err(|e| e.to_string())?;
            let pool = chain
                .pools
                .get(&(call.tokenA, call.tokenB, call.fee.to::<u32>()))
                .copied()
                .unwrap_or(Address::ZERO);
            return Ok(IUniswapV3Factory::getPoolCall::abi_encode_returns(&(pool,)));
        }
        if let Some((token0, token1, fee)) = chain.pool_tokens.get(&to).copied() {
            if selector == IUniswapV3Pool::token0Call::SELECTOR {
                return Ok(IUniswapV3Pool::token0Call::abi_encode_returns(&(token0,)));
            }
            if selector == IUniswapV3Pool::token1Call::SELECTOR {
                return Ok(IUniswapV3Pool::token1Call::abi_encode_returns(&(token1,)));
            }
            if selector == IUniswapV3Pool::feeCall::SELECTOR {
                return Ok(IUniswapV3Pool::feeCall::abi_encode_returns(&(U24::from(fee),)));
            }
        }
        if selector == IQuoterV2::quoteExactInputSingleCall::SELECTOR && to == self.contracts.quoter {
            let call = IQuoterV2::quoteExactInputSingleCall::abi_decode(input, true).map_err(|e| e.to_string())?;
            let out = chain.quote_override.unwrap_or_else(|| chain.swap_output(call.params.amountIn));
            return Ok(IQuoterV2::quoteExactInputSingleCall::abi_encode_returns(&(
                out,
                U160::ZERO,
                1u32,
                U256::from(100_000u64),
            )));
        }
        if to == self.contracts.lending_pool {
            if selector == IAavePool::getUserAccountDataCall::SELECTOR {
                return Ok(IAavePool::getUserAccountDataCall::abi_encode_returns(&(
                    U256::ZERO,
                    U256::ZERO,
                    chain.available_borrows_base,
                    U256::ZERO,
                    U256::ZERO,
                    U256::MAX,
                )));
            }
            if selector == IAavePool::ADDRESSES_PROVIDERCall::SELECTOR {
                return Ok(IAavePool::ADDRESSES_PROVIDERCall::abi_encode_returns(&(ADDRESSES_PROVIDER,)));
            }
        }
        if to == ADDRESSES_PROVIDER && selector == IPoolAddressesProvider::getPriceOracleCall::SELECTOR {
            return Ok(IPoolAddressesProvider::getPriceOracleCall::abi_encode_returns(&(ORACLE,)));
        }
        if to == ORACLE && selector == IAaveOracle::getAssetPriceCall::SELECTOR {
            let call = IAaveOracle::getAssetPriceCall::abi_decode(input, true).map_err(|e| e.to_string())?;
            let price = chain.asset_prices.get(&call.asset).copied().unwrap_or_default();
            return Ok(IAaveOracle::getAssetPriceCall::abi_encode_returns(&(price,)));
        }

        Err(format!("no mock for call {:?} to {}", selector, to))
    }

    /// Applies a transaction; `Ok(false)` means it reverted.
    fn apply(&self, chain: &mut MockChain, to: Address, input: &[u8], logs: &mut Vec<Log>) -> Result<bool, String> {
        let selector: [u8; 4] = input.get(..4).and_then(|s| s.try_into().ok()).ok_or("short input")?;

        if selector == IERC20::approveCall::SELECTOR {
            let call = IERC20::approveCall::abi_decode(input, true).map_err(|e| e.to_string())?;
            chain.allowances.insert((to, self.signer, call.spender), call.amount);
            return Ok(true);
        }

        if selector == ISwapRouter02::exactInputSingleCall::SELECTOR && to == self.contracts.swap_router {
            let call = ISwapRouter02::exactInputSingleCall::abi_decode(input, true).map_err(|e| e.to_string())?;
            let params = call.params;
            chain.last_swap = Some(params.clone());

            let fee = params.fee.to::<u32>();
            let Some(pool) = chain.pools.get(&(params.tokenIn, params.tokenOut, fee)).copied() else {
                return Ok(false);
            };
            let out = chain.swap_output(params.amountIn);
            if out < params.amountOutMinimum {
                return Ok(false);
            }
            if !chain.spend_allowance(params.tokenIn, self.signer, to, params.amountIn)
                || !chain.debit(params.tokenIn, self.signer, params.amountIn)
            {
                return Ok(false);
            }
            chain.credit(params.tokenOut, params.recipient, out);

            let (token0, _, _) = chain.pool_tokens[&pool];
            let paid_in = I256::try_from(params.amountIn).map_err(|e| e.to_string())?;
            let paid_out = -I256::try_from(out).map_err(|e| e.to_string())?;
            let (amount0, amount1) = if params.tokenIn == token0 {
                (paid_in, paid_out)
            } else {
                (paid_out, paid_in)
            };
            let event = IUniswapV3Pool::Swap {
                sender: to,
                recipient: params.recipient,
                amount0,
                amount1,
                sqrtPriceX96: U160::from(1u64) << 96,
                liquidity: 1_000_000_000u128,
                tick: I24::ZERO,
            };
            logs.push(Log { address: pool, data: event.encode_log_data() });
            return Ok(true);
        }

        if to == self.contracts.lending_pool && selector == IAavePool::supplyCall::SELECTOR {
            let call = IAavePool::supplyCall::abi_decode(input, true).map_err(|e| e.to_string())?;
            if !chain.spend_allowance(call.asset, self.signer, to, call.amount)
                || !chain.debit(call.asset, self.signer, call.amount)
            {
                return Ok(false);
            }
            *chain.supplied.entry((call.asset, call.onBehalfOf)).or_default() += call.amount;
            return Ok(true);
        }

        if to == self.contracts.lending_pool && selector == IAavePool::borrowCall::SELECTOR {
            let call = IAavePool::borrowCall::abi_decode(input, true).map_err(|e| e.to_string())?;
            *chain.borrowed.entry((call.asset, call.onBehalfOf)).or_default() += call.amount;
            chain.credit(call.asset, call.onBehalfOf, call.amount);
            return Ok(true);
        }

        Err(format!("no mock for transaction {:?} to {}", selector, to))
    }
}

#[async_trait]
impl Ledger for MockLedger {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn call(&self, to: Address, input: Bytes) -> BotResult<Bytes> {
        self.state.lock().unwrap().calls += 1;
        self.read(to, &input)
            .map(Bytes::from)
            .map_err(|message| BotError::Network { message, source: None })
    }

    async fn send(&self, to: Address, input: Bytes) -> BotResult<TxReceipt> {
        let mut chain = self.state.lock().unwrap();
        let selector: [u8; 4] = input
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .unwrap_or_default();
        chain.sent.push(SentTx { to, selector });

        if chain.timeout_selectors.contains(&selector) {
            return Err(BotError::Timeout {
                operation: format!("confirmation of call to {}", to),
                waited: Duration::from_secs(1),
            });
        }

        let tx_hash = Self::next_hash(&mut chain);
        let mut logs = Vec::new();
        let success = if chain.revert_selectors.contains(&selector) {
            false
        } else {
            self.apply(&mut chain, to, &input, &mut logs)
                .map_err(|message| BotError::Network { message, source: None })?
        };

        Ok(TxReceipt {
            tx_hash,
            block_number: Some(chain.nonce),
            success,
            logs: if success { logs } else { Vec::new() },
        })
    }
}
