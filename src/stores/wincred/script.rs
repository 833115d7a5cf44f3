//! PowerShell scripts driving the `CredentialManager` module.

use crate::query::StoreFilter;
use crate::validation::escape_powershell_string;

/// Script that loads the module, failing if it is not installed.
pub fn import_module(module: &str) -> String {
    format!(
        "Import-Module -Name '{}' -ErrorAction Stop",
        escape_powershell_string(module)
    )
}

/// Script that installs the module from the default repository.
pub fn install_module(module: &str, scope: &str) -> String {
    format!(
        r#"
[Net.ServicePointManager]::SecurityProtocol = [Net.ServicePointManager]::SecurityProtocol -bor [Net.SecurityProtocolType]::Tls12
Install-Module -Name '{}' -Scope '{}' -Force -AllowClobber -ErrorAction Stop
"#,
        escape_powershell_string(module),
        escape_powershell_string(scope)
    )
}

/// Script that runs `Get-StoredCredential` with the parameters `filter`
/// selects and prints the matches as a JSON array.
pub fn lookup(module: &str, filter: &StoreFilter) -> String {
    let params = match filter {
        StoreFilter::TargetAndType(target, ty) => format!(
            " -Target '{}' -Type {}",
            escape_powershell_string(target),
            ty
        ),
        StoreFilter::Target(target) => format!(" -Target '{}'", escape_powershell_string(target)),
        StoreFilter::Type(ty) => format!(" -Type {}", ty),
        StoreFilter::All => String::new(),
    };

    format!(
        r#"
$ErrorActionPreference = 'Stop'
Import-Module -Name '{module}'
$creds = @(Get-StoredCredential -AsCredentialObject{params} -WarningAction SilentlyContinue -ErrorAction SilentlyContinue)
$rows = @($creds | Where-Object {{ $_ }} | ForEach-Object {{
    [PSCustomObject]@{{
        UserName = $_.UserName
        Password = $_.Password
        TargetName = $_.TargetName
        Type = "$($_.Type)"
        Persist = "$($_.Persist)"
        Comment = $_.Comment
        LastWritten = if ($_.LastWritten) {{ $_.LastWritten.ToUniversalTime().ToString('o') }} else {{ $null }}
    }}
}})
ConvertTo-Json -InputObject $rows -Compress -Depth 2
"#,
        module = escape_powershell_string(module),
        params = params
    )
}
