//! Aave V3 pool, addresses provider and price oracle interfaces

use alloy::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IAavePool {
        function supply(address asset, uint256 amount, address onBehalfOf, uint16 referralCode) external;

        function borrow(
            address asset,
            uint256 amount,
            uint256 interestRateMode,
            uint16 referralCode,
            address onBehalfOf
        ) external;

        function getUserAccountData(address user)
            external
            view
            returns (
                uint256 totalCollateralBase,
                uint256 totalDebtBase,
                uint256 availableBorrowsBase,
                uint256 currentLiquidationThreshold,
                uint256 ltv,
                uint256 healthFactor
            );

        function ADDRESSES_PROVIDER() external view returns (address provider);
    }

    #[derive(Debug, PartialEq, Eq)]
    interface IPoolAddressesProvider {
        function getPriceOracle() external view returns (address oracle);
    }

    #[derive(Debug, PartialEq, Eq)]
    interface IAaveOracle {
        function getAssetPrice(address asset) external view returns (uint256 price);
    }
}
