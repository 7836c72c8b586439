//! Contract bindings for the RRC-7755 outbox and inbox, the ERC-4337 entrypoint and the Arbitrum
//! rollup.
//!
//! <https://github.com/base/RRC-7755-poc/tree/main/contracts/src>

use alloy_sol_types::sol;

sol! {
    /// A single call requested by a cross-chain message. `to` is a chain-agnostic 32-byte
    /// identifier; EVM targets occupy its low 20 bytes.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct Call {
        bytes32 to;
        bytes data;
        uint256 value;
    }

    /// ERC-4337 v0.7 packed user operation.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct PackedUserOperation {
        address sender;
        uint256 nonce;
        bytes initCode;
        bytes callData;
        bytes32 accountGasLimits;
        uint256 preVerificationGas;
        bytes32 gasFees;
        bytes paymasterAndData;
        bytes signature;
    }

    /// Arbitrum global state after an assertion has been executed.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct GlobalState {
        bytes32[2] bytes32Vals;
        uint64[2] u64Vals;
    }

    /// Arbitrum assertion state. `machineStatus` is the ABI rendition of the `MachineStatus`
    /// enum (RUNNING, FINISHED, ERRORED).
    #[derive(Debug, Default, PartialEq, Eq)]
    struct AssertionState {
        GlobalState globalState;
        uint8 machineStatus;
        bytes32 endHistoryRoot;
    }

    /// Rollup configuration snapshot carried by every assertion.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct ConfigData {
        bytes32 wasmModuleRoot;
        uint256 requiredStake;
        address challengeManager;
        uint64 confirmPeriodBlocks;
        uint64 nextInboxPosition;
    }

    /// State the assertion was built upon.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct BeforeStateData {
        bytes32 prevPrevAssertionHash;
        bytes32 sequencerBatchAcc;
        ConfigData configData;
    }

    /// Full assertion payload emitted in `AssertionCreated`.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct AssertionInputs {
        BeforeStateData beforeStateData;
        AssertionState beforeState;
        AssertionState afterState;
    }

    /// Beacon-chain anchored proof of an L1 execution state root.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct StateProofParameters {
        bytes32 beaconRoot;
        uint256 beaconOracleTimestamp;
        bytes32 executionStateRoot;
        bytes32[] stateRootProof;
    }

    /// Account and storage proof of a single storage slot.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct StorageProofParameters {
        bytes storageKey;
        bytes storageValue;
        bytes accountProof;
        bytes storageProof;
    }

    /// The nested proof consumed by the Arbitrum prover contract on the source chain.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct RRC7755Proof {
        bytes encodedBlockArray;
        AssertionState afterState;
        bytes32 prevAssertionHash;
        bytes32 sequencerBatchAcc;
        StateProofParameters stateProofParams;
        StorageProofParameters dstL2StateRootProofParams;
        StorageProofParameters dstL2AccountProofParams;
    }

    /// Fulfillment record kept by the inbox per message id.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct FulfillmentInfo {
        uint96 timestamp;
        address filler;
    }

    /// Source-chain contract where cross-chain calls are requested.
    interface RRC7755Outbox {
        /// @notice Emitted when a cross-chain call is requested.
        #[derive(Debug, PartialEq, Eq)]
        event MessagePosted(
            bytes32 indexed messageId,
            bytes32 sourceChain,
            bytes32 sender,
            bytes32 destinationChain,
            bytes32 receiver,
            bytes payload,
            bytes[] attributes
        );

        /// Claims the reward of a fulfilled message by presenting a proof of fulfillment.
        function claimReward(
            bytes32 destinationChain,
            bytes32 receiver,
            bytes payload,
            bytes[] attributes,
            bytes proof,
            address payTo
        ) external;
    }

    /// Destination-chain contract recording fulfillments.
    interface RRC7755Inbox {
        /// Executes the requested calls and records the fulfiller.
        function fulfill(
            bytes32 sourceChain,
            bytes32 sender,
            bytes payload,
            bytes[] attributes,
            address fulfiller
        ) external payable;

        /// Returns the fulfillment record for a message id.
        function getFulfillmentInfo(bytes32 messageId) external view returns (FulfillmentInfo memory);
    }

    /// ERC-4337 entrypoint.
    interface EntryPoint {
        /// Executes a batch of user operations, paying fees to `beneficiary`.
        function handleOps(PackedUserOperation[] ops, address beneficiary) external;
    }

    /// Arbitrum BoLD rollup core.
    interface ArbitrumRollup {
        /// Hash of the latest confirmed assertion.
        function latestConfirmed() external view returns (bytes32);

        /// @notice Emitted when a new assertion is created.
        #[derive(Debug, PartialEq, Eq)]
        event AssertionCreated(
            bytes32 indexed assertionHash,
            bytes32 indexed parentAssertionHash,
            AssertionInputs assertion,
            bytes32 afterInboxBatchAcc,
            uint256 inboxMaxCount,
            bytes32 wasmModuleRoot,
            uint256 requiredStake,
            address challengeManager,
            uint64 confirmPeriodBlocks
        );
    }
}
